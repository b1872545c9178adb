//! Raspberry Pi Pico firmware: an ST7735S SPI panel, a push-button on GPIO15
//! and the RP2040 timer as the 1 Hz tick.
//!
//! Build with `--features firmware --target thumbv6m-none-eabi`.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

use oled_watch::{tick::next_deadline, Rearm, TickTimer};
use rp_pico::hal::{
    fugit::{ExtU32, ExtU64},
    timer::{Alarm, Alarm0, Instant, Timer},
};

/// Alarm 0 of the RP2040 timer, re-armed at absolute deadlines so interrupt
/// latency does not accumulate.
pub struct AlarmTicker {
    alarm: Alarm0,
    timer: Timer,
    deadline: Instant,
    period_us: u32,
}

impl AlarmTicker {
    pub fn start(mut alarm: Alarm0, timer: Timer, period_us: u32) -> Self {
        let deadline = timer.get_counter() + (period_us as u64).micros();
        alarm.schedule_at(deadline).ok();
        alarm.enable_interrupt();
        Self {
            alarm,
            timer,
            deadline,
            period_us,
        }
    }
}

impl TickTimer for AlarmTicker {
    fn acknowledge(&mut self) {
        self.alarm.clear_interrupt();
    }

    fn rearm(&mut self) -> Rearm {
        let now = self.timer.get_counter().ticks();
        let (next, rearm) = next_deadline(self.deadline.ticks(), now, self.period_us as u64);
        self.deadline = Instant::from_ticks(next);

        if self.alarm.schedule_at(self.deadline).is_err() {
            // Deadline is still ahead: count down to it instead
            let remaining = next.saturating_sub(self.timer.get_counter().ticks()) as u32;
            self.alarm.schedule(remaining.micros()).ok();
        }
        rearm
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use defmt::info;
    use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
    use mipidsi::{interface::SpiInterface, models::ST7735s, Builder};
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::RateExtU32,
        gpio::{
            bank0::{Gpio15, Gpio16, Gpio17, Gpio18, Gpio19, Gpio20, Gpio21},
            FunctionSio, FunctionSpi, Pin, PullDown, PullUp, SioInput, SioOutput,
        },
        pac,
        sio::Sio,
        spi::{Enabled, Spi},
        watchdog::Watchdog,
    };

    use oled_watch::{
        config::{BACKGROUND, DEBOUNCE, LAYOUT, PANEL, VARIANT},
        debounce::Debouncer,
        display::clear_panel,
        timer::{TimerPlan, RP2040_TIMER_HZ, TICK_HZ},
        DisplayFormatState, GlyphPanel, TickScheduler,
    };

    const XTAL_HZ: u32 = 12_000_000;
    const SPI_BUFFER_LEN: usize = 512;

    type Spi0 = Spi<
        Enabled,
        pac::SPI0,
        (
            Pin<Gpio19, FunctionSpi, PullDown>,
            Pin<Gpio16, FunctionSpi, PullDown>,
            Pin<Gpio18, FunctionSpi, PullDown>,
        ),
    >;
    type OutPin<G> = Pin<G, FunctionSio<SioOutput>, PullDown>;
    type SpiDevice = ExclusiveDevice<Spi0, OutPin<Gpio17>, NoDelay>;
    type Interface = SpiInterface<'static, SpiDevice, OutPin<Gpio20>>;
    type Display = mipidsi::Display<Interface, ST7735s, OutPin<Gpio21>>;
    type Panel = GlyphPanel<Display>;
    type Button = Pin<Gpio15, FunctionSio<SioInput>, PullUp>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        ticker: AlarmTicker,
        scheduler: TickScheduler,
        panel: Panel,
        tick_format: &'static DisplayFormatState,
        poll_format: &'static DisplayFormatState,
        button: Button,
        debouncer: Debouncer,
        delay: cortex_m::delay::Delay,
    }

    #[init(local = [
        format: DisplayFormatState = DisplayFormatState::new(VARIANT),
        spi_buffer: [u8; SPI_BUFFER_LEN] = [0; SPI_BUFFER_LEN],
    ])]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        info!("oled-watch starting, variant {}", VARIANT);

        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            XTAL_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let button = pins.gpio15.into_pull_up_input();

        let mosi = pins.gpio19.into_function::<FunctionSpi>();
        let miso = pins.gpio16.into_function::<FunctionSpi>();
        let sck = pins.gpio18.into_function::<FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();
        let dc = pins.gpio20.into_push_pull_output();
        let rst = pins.gpio21.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck)).init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            16u32.MHz(),
            &embedded_hal::spi::MODE_0,
        );
        let device = ExclusiveDevice::new_no_delay(spi, cs)
            .unwrap_or_else(|_| defmt::panic!("spi chip select"));
        let interface = SpiInterface::new(device, dc, ctx.local.spi_buffer);

        let mut panel_delay = timer;
        let display = Builder::new(ST7735s, interface)
            .display_size(128, 128)
            .reset_pin(rst)
            .init(&mut panel_delay)
            .unwrap_or_else(|_| defmt::panic!("panel init failed"));

        let mut panel = GlyphPanel::new(display);
        clear_panel(&mut panel, PANEL, BACKGROUND);

        let format: &'static DisplayFormatState = ctx.local.format;
        let mut scheduler = TickScheduler::new(LAYOUT);
        scheduler.render(format, &mut panel);

        let plan = TimerPlan::for_rate(RP2040_TIMER_HZ, TICK_HZ, &[1], u32::MAX)
            .unwrap_or_else(|e| defmt::panic!("tick timer: {}", e));
        info!("tick every {} us", plan.period_us());

        let alarm = defmt::unwrap!(timer.alarm_0());
        let ticker = AlarmTicker::start(alarm, timer, plan.period_us() as u32);

        let delay = cortex_m::delay::Delay::new(ctx.core.SYST, clocks.system_clock.freq().to_Hz());

        (
            Shared {},
            Local {
                ticker,
                scheduler,
                panel,
                tick_format: format,
                poll_format: format,
                button,
                debouncer: Debouncer::new(DEBOUNCE),
                delay,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, local = [ticker, scheduler, panel, tick_format])]
    fn timer_tick(ctx: timer_tick::Context) {
        let timer_tick::LocalResources {
            ticker,
            scheduler,
            panel,
            tick_format,
        } = ctx.local;

        scheduler.on_interrupt(ticker, tick_format, panel);
    }

    // Polling loop: button only. The tick preempts it at any point.
    #[idle(local = [button, debouncer, delay, poll_format])]
    fn idle(ctx: idle::Context) -> ! {
        let idle::LocalResources {
            button,
            debouncer,
            delay,
            poll_format,
        } = ctx.local;

        loop {
            if debouncer.poll(button, delay) {
                let view = poll_format.advance_view();
                info!("button: view {}", view);
            }
        }
    }
}
