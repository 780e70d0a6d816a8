//! Standard USB descriptor records used by the CDC-ECM bundle.
//! https://www.usb.org/document-library/usb-20-specification

use packed_struct::prelude::*;

pub mod cdc;
pub mod ecm;

/// Maximum packet size of a full-speed bulk endpoint.
pub const FULL_SPEED_MAX_PACKET_SIZE: u16 = 64;

/// Descriptor type (bDescriptorType, wValue [high bytes])
#[derive(PrimitiveEnum, Debug, Copy, Clone, PartialEq)]
pub enum DescriptorType {
    Device = 1,
    Configuration = 2,
    String = 3,
    Interface = 4,
    Endpoint = 5,
    DeviceQualifier = 6,
    OtherSpeedConfiguration = 7,
    InterfacePower = 8,
}

/// Interface class codes (assigned by the USB-IF) that a CDC-ECM function
/// uses. https://www.usb.org/defined-class-codes
pub enum InterfaceClass {
    /// Communications and CDC Control
    Communications = 0x02,
    /// CDC Data
    CdcData = 0x0A,
}

/// Transfer type carried in the low two bits of an endpoint descriptor's
/// bmAttributes field.
pub enum TransferType {
    Control = 0x00,
    Isochronous = 0x01,
    Bulk = 0x02,
    Interrupt = 0x03,
}

/// Describes one interface (or one alternate setting of it) within a
/// configuration. It is 9 bytes in size.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "9")]
pub struct InterfaceDescriptor {
    /// Size of this descriptor in bytes.
    #[packed_field(bytes = "0")]
    pub b_length: u8,
    /// Interface Descriptor Type = 4.
    #[packed_field(bytes = "1")]
    pub b_descriptor_type: u8,
    /// The number of this interface.
    #[packed_field(bytes = "2")]
    pub b_interface_number: u8,
    /// Value used to select this alternate setting for the interface.
    #[packed_field(bytes = "3")]
    pub b_alternate_setting: u8,
    /// Number of endpoints used by this interface (excluding endpoint zero).
    #[packed_field(bytes = "4")]
    pub b_num_endpoints: u8,
    /// Class code (assigned by the USB-IF).
    #[packed_field(bytes = "5")]
    pub b_interface_class: u8,
    /// Subclass code (assigned by the USB-IF).
    #[packed_field(bytes = "6")]
    pub b_interface_subclass: u8,
    /// Protocol code (assigned by the USB-IF).
    #[packed_field(bytes = "7")]
    pub b_interface_protocol: u8,
    /// Index of string descriptor describing this interface.
    #[packed_field(bytes = "8")]
    pub i_interface: u8,
}

/// Describes one endpoint of an interface. It is 7 bytes in size.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "7")]
pub struct EndpointDescriptor {
    /// Size of this descriptor in bytes.
    #[packed_field(bytes = "0")]
    pub b_length: u8,
    /// Endpoint Descriptor Type = 5.
    #[packed_field(bytes = "1")]
    pub b_descriptor_type: u8,
    /// Endpoint address. Bits 3..0 are the endpoint number, bit 7 is the
    /// direction (0 = OUT, 1 = IN).
    #[packed_field(bytes = "2")]
    pub b_endpoint_address: u8,
    /// Endpoint attributes. Bits 1..0 are the transfer type ([TransferType]);
    /// the remaining bits are zero for non-isochronous endpoints.
    #[packed_field(bytes = "3")]
    pub bm_attributes: u8,
    /// Maximum packet size this endpoint can send or receive, little-endian.
    #[packed_field(bytes = "4..=5", endian = "lsb")]
    pub w_max_packet_size: Integer<u16, packed_bits::Bits<16>>,
    /// Polling interval in (micro)frames. Ignored for bulk endpoints.
    #[packed_field(bytes = "6")]
    pub b_interval: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_descriptor_packs_packet_size_little_endian() {
        let ep = EndpointDescriptor {
            b_length: 7,
            b_descriptor_type: DescriptorType::Endpoint as u8,
            b_endpoint_address: 0x81,
            bm_attributes: TransferType::Bulk as u8,
            w_max_packet_size: Integer::from_primitive(512),
            b_interval: 0,
        };
        let data = ep.pack().unwrap();
        assert_eq!(data.len(), ep.b_length as usize);
        assert_eq!(data[4], 0x00);
        assert_eq!(data[5], 0x02);
    }

    #[test]
    fn interface_descriptor_is_nine_bytes() {
        let iface = InterfaceDescriptor {
            b_length: 9,
            b_descriptor_type: DescriptorType::Interface as u8,
            b_interface_number: 2,
            b_alternate_setting: 0,
            b_num_endpoints: 1,
            b_interface_class: InterfaceClass::Communications as u8,
            b_interface_subclass: cdc::CommunicationsSubclass::EthernetControlModel as u8,
            b_interface_protocol: 0,
            i_interface: 0,
        };
        let data = iface.pack().unwrap();
        assert_eq!(data.len(), iface.b_length as usize);
        assert_eq!(data[1], 0x04);
        assert_eq!(data[2], 2);
    }
}
