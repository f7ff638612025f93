mod f_anonym;
mod f_bearer;

pub use f_anonym::*;
pub use f_bearer::*;
