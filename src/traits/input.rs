use crate::error::CaptureError;

/// Input source that can grant exclusive pointer capture
pub trait PointerCapture {
    /// Ask for exclusive capture. `Ok` means capture is now held
    fn request_capture(&mut self) -> Result<(), CaptureError>;

    /// Give capture back to the system
    fn release_capture(&mut self);
}

impl<T: PointerCapture + ?Sized> PointerCapture for Box<T> {
    fn request_capture(&mut self) -> Result<(), CaptureError> {
        (**self).request_capture()
    }

    fn release_capture(&mut self) {
        (**self).release_capture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockCapture {
        allow: bool,
        held: bool,
    }

    impl PointerCapture for MockCapture {
        fn request_capture(&mut self) -> Result<(), CaptureError> {
            if self.allow {
                self.held = true;
                Ok(())
            } else {
                Err(CaptureError::Denied("test".into()))
            }
        }

        fn release_capture(&mut self) {
            self.held = false;
        }
    }

    #[test]
    fn boxed_capture_forwards() {
        let mut capture: Box<dyn PointerCapture> = Box::new(MockCapture { allow: true, held: false });
        assert!(capture.request_capture().is_ok());
        capture.release_capture();
    }

    #[test]
    fn denied_capture_reports_error() {
        let mut capture = MockCapture { allow: false, held: false };
        assert!(capture.request_capture().is_err());
        assert!(!capture.held);
    }
}
