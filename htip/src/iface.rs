//! The link layer as seen by the agent.

bitflags::bitflags! {
    /// State flags of a link interface.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InterfaceFlags: u8 {
        /// The interface is administratively up.
        const UP = 0b0000_0001;
        /// The interface supports broadcast.
        const BROADCAST = 0b0000_0010;
        /// The link is up.
        const LINK_UP = 0b0000_0100;
        /// The interface uses ARP, i.e. it is an Ethernet device.
        const ETHARP = 0b0000_1000;
        /// The interface supports IGMP.
        const IGMP = 0b0001_0000;
    }
}

impl InterfaceFlags {
    /// Flags an interface needs before the agent announces on it.
    pub const ANNOUNCE: Self = Self::UP
        .union(Self::BROADCAST)
        .union(Self::LINK_UP)
        .union(Self::ETHARP);

    /// Returns `true` when frames may be announced on an interface with these
    /// flags.
    pub fn can_announce(&self) -> bool {
        self.contains(Self::ANNOUNCE)
    }
}

/// An outgoing-capable link interface.
pub trait LinkInterface {
    /// The interface name, announced as the Port ID.
    fn name(&self) -> &str;

    /// The hardware address, used as the Ethernet source and the Chassis ID.
    fn hardware_address(&self) -> [u8; 6];

    /// The current interface flags.
    fn flags(&self) -> InterfaceFlags;
}

/// A primitive that puts a finished frame on the wire of an interface.
pub trait LinkSender<I: LinkInterface> {
    /// The error returned when a frame could not be sent.
    type Error;

    /// Send `frame` on `iface`.
    fn send(&mut self, iface: &I, frame: &[u8]) -> Result<(), Self::Error>;
}
