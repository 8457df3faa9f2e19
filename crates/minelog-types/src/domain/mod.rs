pub mod branding;
pub mod chemical;
pub mod energy;
pub mod production;
pub mod range;
pub mod record;
pub mod value;
pub mod view;

pub use branding::*;
pub use chemical::*;
pub use energy::*;
pub use production::*;
pub use range::*;
pub use record::*;
pub use value::*;
pub use view::*;
