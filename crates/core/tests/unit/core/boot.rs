//! # Bootstrap Tests
//!
//! `Cpu::boot` places the image, plants the sentinel return address in the top
//! stack slot, and points `rip`/`rsp` at the entry and the sentinel.

use amd64emu_core::common::LoadError;
use amd64emu_core::core::Cpu;
use amd64emu_core::isa::Register;
use amd64emu_core::sim::ProcessImage;
use amd64emu_core::Config;
use pretty_assertions::assert_eq;

use crate::common::harness::{TEST_MEMORY, TestContext};

#[test]
fn sentinel_is_top_slot_and_points_at_itself() {
    let ctx = TestContext::new().load_program(0, &[0xC3]);
    let top = TEST_MEMORY as u64 - 8;
    assert_eq!(ctx.sentinel, top);
    assert_eq!(ctx.get_reg(Register::Rsp), top);
    assert_eq!(ctx.cpu.memory.read(top, 8).unwrap(), top);
    assert_eq!(ctx.cpu.sentinel, Some(top));
}

#[test]
fn image_is_placed_at_load_address() {
    let mut cpu = Cpu::with_memory(4096, false);
    let image = ProcessImage::new(0x100, 0x104, vec![0x90, 0x90, 0x90, 0x90, 0xC3]);
    let _ = cpu.boot(&image).unwrap();
    assert_eq!(cpu.memory.slice(0x100, 5).unwrap(), image.bytes());
    assert_eq!(cpu.regs.get(Register::Rip), 0x104);
    assert_eq!(cpu.retired, 0);
    assert_eq!(cpu.halted(), None);
}

/// Registers other than `rip` and `rsp` start at zero.
#[test]
fn other_registers_start_zeroed() {
    let ctx = TestContext::new().load_program(0x40, &[0xC3]);
    for reg in Register::ALL {
        if reg != Register::Rip && reg != Register::Rsp {
            assert_eq!(ctx.get_reg(reg), 0, "{reg}");
        }
    }
}

#[test]
fn oversized_image_is_rejected() {
    let mut cpu = Cpu::with_memory(64, false);
    let image = ProcessImage::new(60, 60, vec![0xC3; 8]);
    assert!(matches!(
        cpu.boot(&image),
        Err(LoadError::ImageTooLarge { load_address: 60, len: 8, memory_size: 64 })
    ));
}

/// A memory too small for the stack slot cannot be booted.
#[test]
fn memory_without_room_for_sentinel_is_rejected() {
    let mut cpu = Cpu::with_memory(4, false);
    let image = ProcessImage::new(0, 0, Vec::new());
    assert!(matches!(cpu.boot(&image), Err(LoadError::ImageTooLarge { .. })));
}

#[test]
fn cpu_new_uses_configured_memory() {
    let mut config = Config::default();
    config.memory.ram_size = 8192;
    config.general.trace_instructions = true;
    let cpu = Cpu::new(&config);
    assert_eq!(cpu.memory.len(), 8192);
    assert!(cpu.trace);
    assert_eq!(cpu.sentinel, None);
}

#[test]
fn dump_state_mentions_rip_and_registers() {
    let ctx = TestContext::new().load_program(0x10, &[0xC3]);
    let dump = ctx.cpu.dump_state();
    assert!(dump.starts_with("RIP = 0x0000000000000010  retired = 0\n"));
    assert!(dump.contains("rsp   =0x000000000000fff8"));
}
