use std::convert::TryFrom;
use tokio::time::Duration;

/// Tunables for the master. Every field is optional and falls back to a default.
#[derive(Clone, Debug, Default)]
pub struct MasterOptions {
    /// Deadline for a forwarded call to a worker. A worker's Put includes its propagation
    /// round, so this should comfortably exceed the workers' own `rpc_timeout`.
    pub rpc_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

pub(super) struct MasterOptionsValidated {
    pub rpc_timeout: Duration,
    pub connect_timeout: Duration,
}

impl MasterOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.rpc_timeout == Duration::from_millis(0) {
            return Err("RPC timeout must be non-zero");
        }
        if self.connect_timeout > self.rpc_timeout {
            return Err("Connect timeout must not exceed the RPC timeout");
        }

        Ok(())
    }
}

impl TryFrom<MasterOptions> for MasterOptionsValidated {
    type Error = &'static str;

    fn try_from(options: MasterOptions) -> Result<Self, Self::Error> {
        let values = MasterOptionsValidated {
            rpc_timeout: options.rpc_timeout.unwrap_or(Duration::from_secs(10)),
            connect_timeout: options.connect_timeout.unwrap_or(Duration::from_secs(1)),
        };

        values.validate()?;
        Ok(values)
    }
}

/// Tunables for a worker.
#[derive(Clone, Debug, Default)]
pub struct WorkerOptions {
    /// Deadline for each Spread call to a peer and for calls to the master.
    pub rpc_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub register_attempts: Option<u32>,
    pub register_backoff: Option<Duration>,
}

pub(super) struct WorkerOptionsValidated {
    pub rpc_timeout: Duration,
    pub connect_timeout: Duration,
    pub register_attempts: u32,
    pub register_backoff: Duration,
}

impl WorkerOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.rpc_timeout == Duration::from_millis(0) {
            return Err("RPC timeout must be non-zero");
        }
        if self.connect_timeout > self.rpc_timeout {
            return Err("Connect timeout must not exceed the RPC timeout");
        }
        if self.register_attempts == 0 {
            return Err("Worker must attempt to register at least once");
        }

        Ok(())
    }
}

impl TryFrom<WorkerOptions> for WorkerOptionsValidated {
    type Error = &'static str;

    fn try_from(options: WorkerOptions) -> Result<Self, Self::Error> {
        let values = WorkerOptionsValidated {
            rpc_timeout: options.rpc_timeout.unwrap_or(Duration::from_secs(2)),
            connect_timeout: options.connect_timeout.unwrap_or(Duration::from_secs(1)),
            register_attempts: options.register_attempts.unwrap_or(5),
            register_backoff: options.register_backoff.unwrap_or(Duration::from_millis(500)),
        };

        values.validate()?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let master = MasterOptionsValidated::try_from(MasterOptions::default()).unwrap();
        let worker = WorkerOptionsValidated::try_from(WorkerOptions::default()).unwrap();

        assert!(master.rpc_timeout > worker.rpc_timeout);
        assert_eq!(5, worker.register_attempts);
        assert_eq!(Duration::from_millis(500), worker.register_backoff);
    }

    #[test]
    fn connect_timeout_longer_than_rpc_timeout_is_rejected() {
        let options = WorkerOptions {
            rpc_timeout: Some(Duration::from_millis(100)),
            connect_timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        };

        assert!(WorkerOptionsValidated::try_from(options).is_err());
    }

    #[test]
    fn zero_register_attempts_is_rejected() {
        let options = WorkerOptions {
            register_attempts: Some(0),
            ..Default::default()
        };

        assert!(WorkerOptionsValidated::try_from(options).is_err());
    }

    #[test]
    fn zero_master_timeout_is_rejected() {
        let options = MasterOptions {
            rpc_timeout: Some(Duration::from_millis(0)),
            connect_timeout: Some(Duration::from_millis(0)),
        };

        assert!(MasterOptionsValidated::try_from(options).is_err());
    }
}
