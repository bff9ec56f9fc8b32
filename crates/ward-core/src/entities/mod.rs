//! Entity structs for the pipeline data model.
//!
//! All entities are created fresh per run from input files; none persist
//! in-memory state across runs. The flat CSV outputs are the sole durable
//! record.

pub mod district;
pub mod housing;
pub mod landlord;
pub mod property;
pub mod risk;
pub mod service_request;
pub mod sources;
pub mod trend;
pub mod violation;

pub use district::DistrictRiskSummary;
pub use housing::StudentHousingRecord;
pub use landlord::LandlordRiskScore;
pub use property::PropertyRecord;
pub use risk::RiskScore;
pub use service_request::ServiceRequest311;
pub use sources::{AssessmentRecord, SamAddressRecord};
pub use trend::TrendRow;
pub use violation::ViolationEvent;
