//! Reading and writing service descriptor (SCPD) documents
//!
//! The read path is lenient: unknown elements are skipped, an absent
//! `sendEvents` attribute means "not evented", and unparsable range bounds
//! fall back to defaults. The write path is always explicit.

mod element;
mod generate;
mod read;

pub use element::{ScpdElement, SEND_EVENTS_ATTRIBUTE, SERVICE_NAMESPACE};

use crate::error::Result;
use crate::meta::Service;
use upnp_types::ServiceType;

/// Converts between descriptor XML and the [`Service`] model.
pub trait ServiceDescriptorBinder {
    /// Parse a descriptor into a validated service of the given type.
    ///
    /// Validation failures surface as [`crate::DescriptorError::Validation`]
    /// with every violated rule. Every other failure is a
    /// [`crate::DescriptorError::Binding`] carrying the original cause.
    fn read(&self, service_type: ServiceType, descriptor: &str) -> Result<Service>;

    fn generate(&self, service: &Service) -> Result<String>;
}

/// How generated XML is formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Indent nested elements
    pub pretty: bool,
    /// Indentation unit when `pretty` is set
    pub indent: String,
    /// Emit `<?xml version="1.0" ...?>`
    pub xml_declaration: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "    ".to_string(),
            xml_declaration: true,
        }
    }
}

/// Binder for the UDA 1.0 descriptor schema.
#[derive(Debug, Clone, Default)]
pub struct Uda10ServiceDescriptorBinder {
    options: GenerateOptions,
}

impl Uda10ServiceDescriptorBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }
}

impl ServiceDescriptorBinder for Uda10ServiceDescriptorBinder {
    fn read(&self, service_type: ServiceType, descriptor: &str) -> Result<Service> {
        read::read_descriptor(service_type, descriptor)
    }

    fn generate(&self, service: &Service) -> Result<String> {
        generate::generate_descriptor(service, &self.options)
    }
}
