use crate::error::TransportError;
use crate::types::ViewerMessage;

/// Outbound transport for pose messages.
/// Delivery guarantees are the transport's own business
pub trait PoseSink {
    fn send(&mut self, message: &ViewerMessage) -> Result<(), TransportError>;
}

impl<T: PoseSink + ?Sized> PoseSink for Box<T> {
    fn send(&mut self, message: &ViewerMessage) -> Result<(), TransportError> {
        (**self).send(message)
    }
}
