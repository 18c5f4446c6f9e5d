pub mod icons;
pub mod table;

pub use icons::Icons;
pub use table::contacts_table;
