//! One client per Harvest resource.
//!
//! Each client borrows the shared `RequestLayer` and maps its methods
//! one-to-one onto requests. Nothing is cached between calls.

pub mod estimate_messages;
pub mod estimates;
pub mod external_reference;
pub mod invoice_item_categories;
pub mod project_assignments;
pub mod tasks;
pub mod user_assignments;
pub mod users;

pub use estimate_messages::{EstimateMessages, MessageFilter};
pub use estimates::{EstimateFilter, Estimates, ESTIMATE_STATES};
pub use external_reference::ExternalReference;
pub use invoice_item_categories::{InvoiceItemCategories, InvoiceItemCategoryFilter};
pub use project_assignments::{ProjectAssignmentFilter, ProjectAssignments};
pub use tasks::{TaskFilter, Tasks};
pub use user_assignments::{UserAssignmentFilter, UserAssignments};
pub use users::{UserFilter, Users};
