/// Broker core: registries, channel authorization, subscriptions, publish.
pub mod broker;
/// Broker configuration loading.
pub mod config;
/// Common error types: broker operations, message properties, delivery.
pub mod error;
/// Filter engine: property, property-group and time predicates.
pub mod filter;
/// Flexible logging initialization.
pub mod logging;
/// Message model: payload, named properties, creation timestamp.
pub mod message;
/// Transport collaborator: delivery contract and local implementation.
pub mod transport;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Broker facade, client identifiers and service tiers.
pub use broker::{Broker, Channel, ChannelAcl, ClientId, PrivilegedChannel, ServiceTier};
/// config
pub use crate::config::Settings;
/// Operation errors and result types.
pub use error::{BrokerError, BrokerResult, MessageError, RecvError, TryRecvError};
/// Composable message filters.
pub use filter::{
    MessageFilter, MultiValuesFilter, PropertiesFilter, PropertyFilter, TimeFilter, ValueFilter,
};
/// Logging initialization helpers.
pub use logging::{init_logging, try_init_logging};
/// Message model.
pub use message::{Message, PropertyValue};
/// Transport contract and the in-process implementation.
pub use transport::{Delivery, Inbox, LocalTransport, Transport};
