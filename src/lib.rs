//! propdesk: CSV import for a real-estate CRM
//!
//! Bulk-loads leads, inventory units and channel partners from spreadsheet
//! exports into a local workspace, through a guided map/validate/review
//! pipeline.

pub mod cli;
pub mod core;
pub mod entities;
pub mod import;
