//! Per-transaction execution context

use crate::errors::Result;
use crate::gas::{Gas, GasMeter};

/// Context handed to every authenticator operation.
///
/// One context exists per transaction attempt and is never shared between
/// concurrently processed transactions.
#[derive(Debug, Clone)]
pub struct AuthContext {
    chain_id: String,
    block_height: u64,
    gas_meter: GasMeter,
}

impl AuthContext {
    pub fn new(chain_id: impl Into<String>, block_height: u64, gas_limit: Gas) -> Self {
        Self {
            chain_id: chain_id.into(),
            block_height,
            gas_meter: GasMeter::new(gas_limit),
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn gas_meter(&self) -> &GasMeter {
        &self.gas_meter
    }

    /// Charge gas on the transaction meter.
    pub fn consume_gas(&mut self, amount: Gas, descriptor: &str) -> Result<()> {
        self.gas_meter.consume(amount, descriptor)
    }
}
