//! CDC (Communications Device Class) functional descriptors
//! https://www.usb.org/document-library/class-definitions-communication-devices-12

use packed_struct::prelude::*;

/// bDescriptorType for class-specific interface descriptors.
pub const CS_INTERFACE: u8 = 0x24;

/// CDC specification release number carried in bcdCDC (1.20 as BCD).
pub const BCD_CDC_1_2: u16 = 0x0120;

/// Subclass codes for the Communications interface class.
pub enum CommunicationsSubclass {
    None = 0x00,
    EthernetControlModel = 0x06,
}

/// bDescriptorSubtype codes for CS_INTERFACE functional descriptors.
pub enum FunctionalDescriptorSubtype {
    Header = 0x00,
    Union = 0x06,
    EthernetNetworking = 0x0F,
}

/// Marks the beginning of a concatenated set of functional descriptors and
/// declares the CDC specification release they conform to.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "5")]
pub struct HeaderFunctionalDescriptor {
    #[packed_field(bytes = "0")]
    pub b_function_length: u8,
    #[packed_field(bytes = "1")]
    pub b_descriptor_type: u8,
    #[packed_field(bytes = "2")]
    pub b_descriptor_subtype: u8,
    /// CDC specification release number in binary-coded decimal.
    #[packed_field(bytes = "3..=4", endian = "lsb")]
    pub bcd_cdc: Integer<u16, packed_bits::Bits<16>>,
}

impl HeaderFunctionalDescriptor {
    pub fn new() -> Self {
        Self {
            b_function_length: 5,
            b_descriptor_type: CS_INTERFACE,
            b_descriptor_subtype: FunctionalDescriptorSubtype::Header as u8,
            bcd_cdc: Integer::from_primitive(BCD_CDC_1_2),
        }
    }
}

impl Default for HeaderFunctionalDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups a communications (master) interface with the data (slave)
/// interface(s) that together form one function.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "5")]
pub struct UnionFunctionalDescriptor {
    #[packed_field(bytes = "0")]
    pub b_function_length: u8,
    #[packed_field(bytes = "1")]
    pub b_descriptor_type: u8,
    #[packed_field(bytes = "2")]
    pub b_descriptor_subtype: u8,
    /// Interface number of the controlling (communications) interface.
    #[packed_field(bytes = "3")]
    pub b_master_interface: u8,
    /// Interface number of the first subordinate (data) interface.
    #[packed_field(bytes = "4")]
    pub b_slave_interface0: u8,
}

impl UnionFunctionalDescriptor {
    pub fn new(master: u8, slave: u8) -> Self {
        Self {
            b_function_length: 5,
            b_descriptor_type: CS_INTERFACE,
            b_descriptor_subtype: FunctionalDescriptorSubtype::Union as u8,
            b_master_interface: master,
            b_slave_interface0: slave,
        }
    }
}

/// Declares the Ethernet-specific properties of an ECM function: where to
/// find the MAC address string, the largest frame the function forwards, and
/// its multicast/power filtering abilities.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "13")]
pub struct EthernetNetworkingFunctionalDescriptor {
    #[packed_field(bytes = "0")]
    pub b_function_length: u8,
    #[packed_field(bytes = "1")]
    pub b_descriptor_type: u8,
    #[packed_field(bytes = "2")]
    pub b_descriptor_subtype: u8,
    /// Index of the string descriptor holding the 48-bit MAC address as
    /// twelve hexadecimal characters. Mandatory, must not be zero.
    #[packed_field(bytes = "3")]
    pub i_mac_address: u8,
    /// Bitmap of the Ethernet statistics the function collects.
    #[packed_field(bytes = "4..=7", endian = "lsb")]
    pub bm_ethernet_statistics: Integer<u32, packed_bits::Bits<32>>,
    /// Maximum segment size the function supports, typically 1514.
    #[packed_field(bytes = "8..=9", endian = "lsb")]
    pub w_max_segment_size: Integer<u16, packed_bits::Bits<16>>,
    /// Number of multicast filters (and whether they are perfect filters).
    #[packed_field(bytes = "10..=11", endian = "lsb")]
    pub w_number_mc_filters: Integer<u16, packed_bits::Bits<16>>,
    /// Number of pattern filters available for wake-up.
    #[packed_field(bytes = "12")]
    pub b_number_power_filters: u8,
}

impl EthernetNetworkingFunctionalDescriptor {
    /// Descriptor for a function with no statistics and no filters.
    pub fn new(i_mac_address: u8, max_segment_size: u16) -> Self {
        Self {
            b_function_length: 13,
            b_descriptor_type: CS_INTERFACE,
            b_descriptor_subtype: FunctionalDescriptorSubtype::EthernetNetworking as u8,
            i_mac_address,
            bm_ethernet_statistics: Integer::from_primitive(0),
            w_max_segment_size: Integer::from_primitive(max_segment_size),
            w_number_mc_filters: Integer::from_primitive(0),
            b_number_power_filters: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_descriptor_declares_cdc_1_2() {
        let header = HeaderFunctionalDescriptor::new();
        let data = header.pack().unwrap();
        assert_eq!(data.len(), header.b_function_length as usize);
        assert_eq!(data, [0x05, 0x24, 0x00, 0x20, 0x01]);
    }

    #[test]
    fn union_descriptor_carries_interface_numbers() {
        let union = UnionFunctionalDescriptor::new(3, 4);
        let data = union.pack().unwrap();
        assert_eq!(data, [0x05, 0x24, 0x06, 0x03, 0x04]);
    }

    #[test]
    fn ethernet_descriptor_packs_segment_size_little_endian() {
        let enet = EthernetNetworkingFunctionalDescriptor::new(4, 1514);
        let data = enet.pack().unwrap();
        assert_eq!(data.len(), enet.b_function_length as usize);
        assert_eq!(data[0], 13);
        assert_eq!(data[1], CS_INTERFACE);
        assert_eq!(data[2], 0x0F);
        assert_eq!(data[3], 4);
        // all-zero statistics bitmap
        assert_eq!(&data[4..8], &[0, 0, 0, 0]);
        // 1514 = 0x05EA
        assert_eq!(&data[8..10], &[0xEA, 0x05]);
        assert_eq!(&data[10..12], &[0, 0]);
        assert_eq!(data[12], 0);
    }
}
