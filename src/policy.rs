/// Why a payload was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection(pub String);

/// Decides whether a payload may be appended to a chain.
pub trait PayloadPolicy: Send + Sync {
    fn check(&self, payload: &[u8]) -> Result<(), Rejection>;
}

/// Accepts anything, including empty payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl PayloadPolicy for AcceptAll {
    fn check(&self, _payload: &[u8]) -> Result<(), Rejection> {
        Ok(())
    }
}

/// Upper bound on payload length in bytes (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxPayloadSize(pub usize);

impl PayloadPolicy for MaxPayloadSize {
    fn check(&self, payload: &[u8]) -> Result<(), Rejection> {
        if payload.len() > self.0 {
            return Err(Rejection(format!(
                "payload is {} bytes, limit is {}",
                payload.len(),
                self.0
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NonEmpty;

impl PayloadPolicy for NonEmpty {
    fn check(&self, payload: &[u8]) -> Result<(), Rejection> {
        if payload.is_empty() {
            return Err(Rejection("payload is empty".to_string()));
        }
        Ok(())
    }
}
