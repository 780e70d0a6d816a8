//! CDC-ECM (Ethernet Control Model) interface descriptor bundle
//! https://www.usb.org/document-library/class-definitions-communication-devices-12
//!
//! The bundle covers one ECM function: a communications interface carrying
//! the CDC functional descriptors and an interrupt notification endpoint,
//! plus a data interface with a zero-bandwidth alternate setting 0 and an
//! active alternate setting 1 exposing the two bulk endpoints. It is meant
//! to be embedded into a configuration descriptor assembled elsewhere.

use packed_struct::prelude::*;

use super::{
    cdc::{
        CommunicationsSubclass, EthernetNetworkingFunctionalDescriptor,
        HeaderFunctionalDescriptor, UnionFunctionalDescriptor,
    },
    DescriptorType, EndpointDescriptor, InterfaceClass, InterfaceDescriptor, TransferType,
    FULL_SPEED_MAX_PACKET_SIZE,
};

/// Maximum packet size of the bulk data endpoints.
pub const ECM_DATA_PACKET_SIZE: u16 = FULL_SPEED_MAX_PACKET_SIZE;
/// Maximum packet size of the interrupt notification endpoint.
pub const ECM_NOTIFY_PACKET_SIZE: u16 = 16;
/// Maximum Ethernet segment size: 1500 byte payload plus the 14 byte header.
pub const ECM_MAX_SEGMENT_SIZE: u16 = 1514;

/// Serialized size of [EcmInterface] in bytes.
pub const ECM_INTERFACE_SIZE: usize = 71;

/// Descriptor bundle for one CDC-ECM function, in the order the records
/// appear on the wire inside the configuration descriptor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EcmInterface {
    /// Communications interface carrying notifications
    pub ctl_interface: InterfaceDescriptor,
    pub cdc_header: HeaderFunctionalDescriptor,
    pub cdc_union: UnionFunctionalDescriptor,
    pub cdc_ethernet: EthernetNetworkingFunctionalDescriptor,
    /// Interrupt endpoint for NETWORK_CONNECTION style notifications
    pub notify_ep: EndpointDescriptor,
    /// Data interface, alternate setting 0 (zero bandwidth)
    pub data_alt0_interface: InterfaceDescriptor,
    /// Data interface, alternate setting 1 (bulk endpoints active)
    pub data_alt1_interface: InterfaceDescriptor,
    pub bulk_out_ep: EndpointDescriptor,
    pub bulk_in_ep: EndpointDescriptor,
}

impl EcmInterface {
    /// Populate the bundle for the given interface numbers, endpoint
    /// addresses and MAC address string index. The caller is responsible for
    /// assigning numbers that do not collide elsewhere in the configuration;
    /// no validation happens here.
    pub fn new(
        ctl_iface: u8,
        data_iface: u8,
        notify_ep: u8,
        bulk_out_ep: u8,
        bulk_in_ep: u8,
        i_mac_address: u8,
    ) -> Self {
        Self {
            ctl_interface: InterfaceDescriptor {
                b_length: 9,
                b_descriptor_type: DescriptorType::Interface as u8,
                b_interface_number: ctl_iface,
                b_alternate_setting: 0x00,
                b_num_endpoints: 0x01,
                b_interface_class: InterfaceClass::Communications as u8,
                b_interface_subclass: CommunicationsSubclass::EthernetControlModel as u8,
                b_interface_protocol: 0x00,
                i_interface: 0x00,
            },
            cdc_header: HeaderFunctionalDescriptor::new(),
            cdc_union: UnionFunctionalDescriptor::new(ctl_iface, data_iface),
            cdc_ethernet: EthernetNetworkingFunctionalDescriptor::new(
                i_mac_address,
                ECM_MAX_SEGMENT_SIZE,
            ),
            notify_ep: EndpointDescriptor {
                b_length: 7,
                b_descriptor_type: DescriptorType::Endpoint as u8,
                b_endpoint_address: notify_ep,
                bm_attributes: TransferType::Interrupt as u8,
                w_max_packet_size: Integer::from_primitive(ECM_NOTIFY_PACKET_SIZE),
                b_interval: 0xFF,
            },
            data_alt0_interface: InterfaceDescriptor {
                b_length: 9,
                b_descriptor_type: DescriptorType::Interface as u8,
                b_interface_number: data_iface,
                b_alternate_setting: 0x00,
                b_num_endpoints: 0x00,
                b_interface_class: InterfaceClass::CdcData as u8,
                b_interface_subclass: 0x00,
                b_interface_protocol: 0x00,
                i_interface: 0x00,
            },
            data_alt1_interface: InterfaceDescriptor {
                b_length: 9,
                b_descriptor_type: DescriptorType::Interface as u8,
                b_interface_number: data_iface,
                b_alternate_setting: 0x01,
                b_num_endpoints: 0x02,
                b_interface_class: InterfaceClass::CdcData as u8,
                b_interface_subclass: 0x00,
                b_interface_protocol: 0x00,
                i_interface: 0x00,
            },
            bulk_out_ep: EndpointDescriptor {
                b_length: 7,
                b_descriptor_type: DescriptorType::Endpoint as u8,
                b_endpoint_address: bulk_out_ep,
                bm_attributes: TransferType::Bulk as u8,
                w_max_packet_size: Integer::from_primitive(ECM_DATA_PACKET_SIZE),
                b_interval: 0x00,
            },
            bulk_in_ep: EndpointDescriptor {
                b_length: 7,
                b_descriptor_type: DescriptorType::Endpoint as u8,
                b_endpoint_address: bulk_in_ep,
                bm_attributes: TransferType::Bulk as u8,
                w_max_packet_size: Integer::from_primitive(ECM_DATA_PACKET_SIZE),
                b_interval: 0x00,
            },
        }
    }

    /// Serialize the bundle into its 71 byte wire image.
    pub fn pack_to_vec(&self) -> Result<Vec<u8>, PackingError> {
        let mut data = Vec::with_capacity(ECM_INTERFACE_SIZE);
        data.extend_from_slice(&self.ctl_interface.pack()?);
        data.extend_from_slice(&self.cdc_header.pack()?);
        data.extend_from_slice(&self.cdc_union.pack()?);
        data.extend_from_slice(&self.cdc_ethernet.pack()?);
        data.extend_from_slice(&self.notify_ep.pack()?);
        data.extend_from_slice(&self.data_alt0_interface.pack()?);
        data.extend_from_slice(&self.data_alt1_interface.pack()?);
        data.extend_from_slice(&self.bulk_out_ep.pack()?);
        data.extend_from_slice(&self.bulk_in_ep.pack()?);
        Ok(data)
    }

    /// Reconstruct a bundle from its wire image. The slice must be exactly
    /// [ECM_INTERFACE_SIZE] bytes.
    pub fn unpack_from_slice(data: &[u8]) -> Result<Self, PackingError> {
        if data.len() != ECM_INTERFACE_SIZE {
            return Err(PackingError::BufferSizeMismatch {
                expected: ECM_INTERFACE_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self {
            ctl_interface: InterfaceDescriptor::unpack_from_slice(&data[0..9])?,
            cdc_header: HeaderFunctionalDescriptor::unpack_from_slice(&data[9..14])?,
            cdc_union: UnionFunctionalDescriptor::unpack_from_slice(&data[14..19])?,
            cdc_ethernet: EthernetNetworkingFunctionalDescriptor::unpack_from_slice(
                &data[19..32],
            )?,
            notify_ep: EndpointDescriptor::unpack_from_slice(&data[32..39])?,
            data_alt0_interface: InterfaceDescriptor::unpack_from_slice(&data[39..48])?,
            data_alt1_interface: InterfaceDescriptor::unpack_from_slice(&data[48..57])?,
            bulk_out_ep: EndpointDescriptor::unpack_from_slice(&data[57..64])?,
            bulk_in_ep: EndpointDescriptor::unpack_from_slice(&data[64..71])?,
        })
    }
}

/// [EcmInterface] builder for assigning interface numbers, endpoint
/// addresses and the MAC address string index over sensible defaults.
pub struct EcmInterfaceBuilder {
    ctl_iface: u8,
    data_iface: u8,
    notify_ep: u8,
    bulk_out_ep: u8,
    bulk_in_ep: u8,
    i_mac_address: u8,
}

impl EcmInterfaceBuilder {
    pub fn new() -> Self {
        Self {
            ctl_iface: 0,
            data_iface: 1,
            notify_ep: 0x81,
            bulk_out_ep: 0x02,
            bulk_in_ep: 0x83,
            i_mac_address: 0,
        }
    }

    /// Construct the descriptor bundle
    pub fn build(&self) -> EcmInterface {
        let iface = EcmInterface::new(
            self.ctl_iface,
            self.data_iface,
            self.notify_ep,
            self.bulk_out_ep,
            self.bulk_in_ep,
            self.i_mac_address,
        );
        log::debug!("Control Interface Descriptor: {}", iface.ctl_interface);
        log::debug!("Header Functional Descriptor: {}", iface.cdc_header);
        log::debug!("Union Functional Descriptor: {}", iface.cdc_union);
        log::debug!("Ethernet Functional Descriptor: {}", iface.cdc_ethernet);
        log::debug!("Notify Endpoint Descriptor: {}", iface.notify_ep);
        log::debug!("Data Alt0 Interface Descriptor: {}", iface.data_alt0_interface);
        log::debug!("Data Alt1 Interface Descriptor: {}", iface.data_alt1_interface);
        log::debug!("Bulk OUT Endpoint Descriptor: {}", iface.bulk_out_ep);
        log::debug!("Bulk IN Endpoint Descriptor: {}", iface.bulk_in_ep);

        iface
    }

    /// Set the communications (control) interface number
    pub fn control_interface(&mut self, number: u8) -> &mut Self {
        self.ctl_iface = number;
        self
    }

    /// Set the data interface number
    pub fn data_interface(&mut self, number: u8) -> &mut Self {
        self.data_iface = number;
        self
    }

    /// Set the notification endpoint address (IN, so bit 7 set)
    pub fn notify_endpoint(&mut self, address: u8) -> &mut Self {
        self.notify_ep = address;
        self
    }

    /// Set the bulk OUT endpoint address
    pub fn bulk_out_endpoint(&mut self, address: u8) -> &mut Self {
        self.bulk_out_ep = address;
        self
    }

    /// Set the bulk IN endpoint address (bit 7 set)
    pub fn bulk_in_endpoint(&mut self, address: u8) -> &mut Self {
        self.bulk_in_ep = address;
        self
    }

    /// Set the index of the string descriptor holding the MAC address
    pub fn mac_address_string(&mut self, index: u8) -> &mut Self {
        self.i_mac_address = index;
        self
    }
}

impl Default for EcmInterfaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
