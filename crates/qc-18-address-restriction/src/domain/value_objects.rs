//! Value objects for Address Restriction

use serde::{Deserialize, Serialize};
use shared_types::{Address, BatchId};

/// Stored byte for a restricting entry
pub const RESTRICTED_BYTE: u8 = 0x01;
/// Stored byte for an unrestricting entry
pub const UNRESTRICTED_BYTE: u8 = 0x00;

/// Direction a provisional entry proposes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Restricted,
    Unrestricted,
}

impl Status {
    pub fn to_byte(self) -> u8 {
        match self {
            Status::Restricted => RESTRICTED_BYTE,
            Status::Unrestricted => UNRESTRICTED_BYTE,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            RESTRICTED_BYTE => Some(Status::Restricted),
            UNRESTRICTED_BYTE => Some(Status::Unrestricted),
            _ => None,
        }
    }

    pub fn is_restricted(self) -> bool {
        self == Status::Restricted
    }
}

/// One provisional decision: `address` proposed `status` by `batch_id`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporaryEntry {
    pub address: Address,
    pub batch_id: BatchId,
    pub status: Status,
}

impl TemporaryEntry {
    pub fn new(address: Address, batch_id: BatchId, status: Status) -> Self {
        Self {
            address,
            batch_id,
            status,
        }
    }
}

/// A restriction change carried by a governance batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchAction {
    Restrict(Vec<Address>),
    Unrestrict(Vec<Address>),
}

/// How a governance batch ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchOutcome {
    Passed,
    Rejected,
    Expired,
}
