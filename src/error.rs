/// Errors that can end a calibration run.
#[derive(Debug, thiserror::Error)]
pub enum ChaperoneError {
    #[error("VR runtime init failed: {0}")]
    RuntimeInit(String),

    #[error("compositor unavailable: {0}")]
    CompositorUnavailable(String),

    #[error("only {0} boundary point(s) recorded, chaperone needs at least 3")]
    InsufficientPoints(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_points_names_the_count() {
        let msg = ChaperoneError::InsufficientPoints(2).to_string();
        assert!(msg.contains("only 2"));
        assert!(msg.contains("at least 3"));
    }
}
