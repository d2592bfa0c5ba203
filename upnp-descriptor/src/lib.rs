//! UPnP service descriptors
//!
//! This crate holds the immutable model of a UPnP service (actions, arguments
//! and state variables), the builtin datatypes, the structural validation
//! rules, and a binder that reads and writes SCPD XML documents.
//!
//! # Example
//!
//! ```
//! use upnp_descriptor::{ServiceDescriptorBinder, Uda10ServiceDescriptorBinder};
//! use upnp_types::ServiceType;
//!
//! let xml = r#"<scpd xmlns="urn:schemas-upnp-org:service-1-0">
//!   <specVersion><major>1</major><minor>0</minor></specVersion>
//!   <serviceStateTable>
//!     <stateVariable sendEvents="yes">
//!       <name>LastChange</name>
//!       <dataType>string</dataType>
//!     </stateVariable>
//!   </serviceStateTable>
//! </scpd>"#;
//!
//! let binder = Uda10ServiceDescriptorBinder::new();
//! let service = binder.read(ServiceType::uda("RenderingControl", 1)?, xml)?;
//! assert!(service.state_variable("LastChange").unwrap().send_events());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binder;
pub mod datatype;
pub mod error;
pub mod meta;
pub mod staging;
pub mod validation;

pub use binder::{GenerateOptions, ScpdElement, ServiceDescriptorBinder, Uda10ServiceDescriptorBinder};
pub use datatype::{Datatype, UnknownDatatype};
pub use error::{DescriptorBindingError, DescriptorError, Result};
pub use meta::{
    Action, ActionArgument, AllowedValueRange, Direction, Service, SpecVersion, StateVariable,
    UnknownDirection,
};
pub use staging::{StagedAction, StagedArgument, StagedService, StagedStateVariable};
pub use validation::{Validate, ValidationError, ValidationException};
