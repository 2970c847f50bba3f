pub mod control_loop;
pub mod listener;
pub mod wifi;
