// Broker defaults (No magic values)

/// Registry ceiling when none is configured
pub const DEFAULT_MAX_QUEUES: usize = 10;

/// Per-queue capacity when none is configured
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 100;

/// Consumer wait (seconds) when the request does not carry one
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
