pub mod category;
pub mod record;

pub use category::Category;
pub use record::ReceiptRecord;
