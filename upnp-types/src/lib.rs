//! UPnP identifier grammar
//!
//! This crate parses and formats the structured identifiers used throughout a
//! UPnP stack: device types, service types, SOAP action types, unique device
//! names and the USN values built from them.
//!
//! # Quick Start
//!
//! ```
//! use upnp_types::{DeviceType, ServiceType, SoapActionType};
//!
//! let renderer: DeviceType = "urn:schemas-upnp-org:device:MediaRenderer:2".parse()?;
//! let v1 = DeviceType::uda("MediaRenderer", 1)?;
//! assert!(renderer.implements_version(&v1));
//!
//! let action = SoapActionType::parse("urn:schemas-upnp-org:service:AVTransport:1#Play")?;
//! assert_eq!(action.service_type(), Some(ServiceType::uda("AVTransport", 1)?));
//! # Ok::<(), upnp_types::TypeError>(())
//! ```
//!
//! Every identifier prints in its canonical form and parses back to an equal
//! value.

mod device_type;
mod error;
pub mod grammar;
mod service_type;
mod soap_action_type;
mod urn;
mod usn;

pub use device_type::DeviceType;
pub use error::{Result, TypeError};
pub use service_type::ServiceType;
pub use soap_action_type::{SoapActionType, MAGIC_CONTROL_NAMESPACE, MAGIC_CONTROL_TYPE};
pub use usn::{DeviceUsn, ServiceUsn, Udn};
