// Re-export all items from the submodules
mod catalog;
mod default_catalog;
mod env_vars;
mod tasks;

pub use catalog::{TaskCatalog, load_catalog};

pub use default_catalog::default_catalog;

pub use env_vars::expand_env_vars;

pub use tasks::{
    CopyTask,
    OutcomeAliases,
    OutcomeKeys,
    RegistryExportTask,
    Task,
    TaskBindings,
};
