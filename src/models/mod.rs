mod customer;
mod invoice;
mod revenue;
mod user;

pub use customer::Customer;
pub use invoice::{Invoice, InvoiceStatus};
pub use revenue::Revenue;
pub use user::{User, UserView};
