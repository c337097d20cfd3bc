pub mod inventory;
pub mod message;
pub mod playbook;
pub mod schedule;

pub use inventory::*;
pub use message::*;
pub use playbook::*;
pub use schedule::*;
