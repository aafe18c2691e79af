pub mod design_repo;

pub use design_repo::DesignRepo;
