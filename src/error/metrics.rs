use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("No samples were collected.")]
    EmptySeries,
    #[error("Stats channel closed before the run finished.")]
    ChannelClosed,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
