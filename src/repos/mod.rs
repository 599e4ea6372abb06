pub mod memory;
pub mod remote;
pub mod templates;

pub use memory::InMemoryTemplateRepository;
pub use remote::RemoteTemplateRepository;
pub use templates::TemplateRepository;
