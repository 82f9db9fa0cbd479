pub mod highlight;
pub mod logging;
pub mod worker;
