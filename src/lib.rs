//! Descriptor set for a USB CDC-ECM (Ethernet Control Model) function.
//!
//! Builds the byte-exact interface/endpoint/functional descriptor bundle that
//! a CDC-ECM function contributes to a configuration descriptor. Assembling
//! the surrounding configuration and serving it to the host during
//! enumeration is the job of the USB device stack that embeds this bundle.

pub mod usb;

pub use usb::ecm::{EcmInterface, EcmInterfaceBuilder};
