pub mod auth;

pub mod courses;

pub mod assignments;

pub mod materials;

pub mod submissions;

pub mod grades;

pub mod files;

pub mod system;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use files::configure_file_routes;
pub use grades::configure_grades_routes;
pub use materials::configure_materials_routes;
pub use submissions::configure_submissions_routes;
pub use system::configure_system_routes;
