//! Architecture selection.
//!
//! Cortex-M targets get real PRIMASK masking and `dsb`/`isb` barriers. Any
//! other target (host builds, unit tests) gets a portable stand-in so the
//! driver logic above it can run off-target.

cfg_if::cfg_if! {
    if #[cfg(target_arch = "arm")] {
        pub mod arm;
        pub use arm::barrier;
        pub use arm::irq::ArmIrq as CpuIrq;
    } else {
        pub mod host;
        pub use host::barrier;
        pub use host::HostIrq as CpuIrq;
    }
}
