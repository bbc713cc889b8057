//! turbanOS kernel entry point.
//!
//! Only meaningful on the bare-metal target. Host builds get a stub `main`.

#![cfg_attr(target_os = "none", no_std, no_main)]

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod kernel {
    use bootloader::{entry_point, BootInfo};
    use core::panic::PanicInfo;
    use turban_hal::Cpu;
    use turban_kernel::arch::x86_64::{self, vga::Color, Pic8259, X86Cpu, X86Ports};
    use turban_kernel::boot::{self, Status};
    use turban_kernel::config::KernelConfig;
    use turban_kernel::terminal::{Machine, Terminal};
    use turban_kernel::{keyboard, println, selftest, serial_println};

    entry_point!(kernel_main);

    /// Kernel entry point.
    ///
    /// Called by the bootloader after setting up the initial environment.
    fn kernel_main(_boot_info: &'static BootInfo) -> ! {
        turban_kernel::init();
        let config = KernelConfig::DEFAULT;

        x86_64::vga::clear_screen();
        boot::banner::print_banner();
        boot::log(Status::Ok, "Serial port initialized");

        x86_64::interrupts::init_idt();
        boot::log(Status::Ok, "IDT loaded, PICs remapped to 32/40");

        let Some(mut input) = keyboard::init() else {
            panic!("keyboard ring already claimed");
        };
        boot::log(Status::Ok, "Keyboard ready");

        match selftest::run_all() {
            0 => boot::log(Status::Ok, "Self-checks passed"),
            failed => {
                boot::log(Status::Fail, "Self-checks failed");
                boot::log_detail(if failed == 1 {
                    "1 check failed, see serial log"
                } else {
                    "several checks failed, see serial log"
                });
            }
        }

        let mut cpu = X86Cpu;
        cpu.spin(config.boot_delay);
        boot::log(Status::Info, "Starting shell");

        let mut machine = Machine {
            display: x86_64::vga::GlobalConsole,
            ports: X86Ports,
            interrupts: Pic8259,
            cpu,
            config,
        };
        Terminal::new().run(&mut input, &mut machine)
    }

    /// Panic handler.
    ///
    /// Called when the kernel encounters an unrecoverable error.
    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        serial_println!("KERNEL PANIC: {}", info);

        x86_64::vga::set_color(Color::LightRed, Color::Black);
        println!("\n\n!!! KERNEL PANIC !!!");
        x86_64::vga::reset_color();
        println!("{}", info);

        x86_64::halt_loop()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("turban-kernel only runs on bare metal.");
    eprintln!("Build a bootable image with `cargo bootimage --target x86_64-turban.json`.");
}
