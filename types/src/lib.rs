//! Fundamental types for Linea Voyager.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the watched user address, token balance conversion, campaign activations,
//! governance proposals, localized captions, the persisted snap state, and the
//! signed registration payload.

pub mod activation;
pub mod address;
pub mod amount;
pub mod captions;
pub mod error;
pub mod network;
pub mod proposal;
pub mod registration;
pub mod state;

pub use activation::{filter_current_activations, Activation, GET_XP_TAG};
pub use address::UserAddress;
pub use alloy_primitives::{I256, U256};
pub use amount::{convert_balance_to_display, RawBalance, TOKEN_DECIMALS};
pub use captions::Captions;
pub use error::TypesError;
pub use network::{ChainId, LXP_CONTRACT_ADDRESS, LXP_L_CONTRACT_ADDRESS};
pub use proposal::{filter_active_proposals, Proposal, ProposalMetadata, ProposalStatus};
pub use registration::{RegistrationPayload, SignedOn, SignedRegistration};
pub use state::SnapState;
