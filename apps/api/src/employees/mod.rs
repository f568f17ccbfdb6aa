// Employee directory: listing/filtering, create/edit, soft delete, CSV import.

pub mod csv_import;
pub mod filters;
pub mod handlers;
pub mod repository;
pub mod validation;
