pub mod formats;
pub mod group;
pub mod remark;
