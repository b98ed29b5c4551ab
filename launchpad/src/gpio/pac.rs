use tm4c123x::{gpio_porta::RegisterBlock as GpioRegisterBlock, GPIO_PORTB, GPIO_PORTF};

use super::{Function, Gpio, Port};

/// Value unlocking the commit register.
const UNLOCK: u32 = 0x4C4F_434B;

impl Port {
    #[inline]
    fn ptr(self) -> *const GpioRegisterBlock {
        match self {
            Port::B => GPIO_PORTB::ptr(),
            Port::F => GPIO_PORTF::ptr(),
        }
    }
}

/// Route the pin to the given alternate function as a 2mA push-pull output.
pub(crate) fn configure(gpio: Gpio, function: Function) {
    let port = unsafe { &*gpio.port().ptr() };
    let mask = gpio.pin().mask() as u32;
    let shift = 4 * gpio.pin() as u32;

    if gpio.is_locked() {
        port.lock.write(|w| unsafe { w.bits(UNLOCK) });
        port.cr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
        port.lock.write(|w| unsafe { w.bits(0) });
    }

    unsafe {
        port.pctl
            .modify(|r, w| w.bits((r.bits() & !(0xF << shift)) | ((function.0 as u32) << shift)));
        port.amsel.modify(|r, w| w.bits(r.bits() & !mask));
        port.afsel.modify(|r, w| w.bits(r.bits() | mask));
        port.dr2r.modify(|r, w| w.bits(r.bits() | mask));
        port.odr.modify(|r, w| w.bits(r.bits() & !mask));
        port.pur.modify(|r, w| w.bits(r.bits() & !mask));
        port.pdr.modify(|r, w| w.bits(r.bits() & !mask));
        port.den.modify(|r, w| w.bits(r.bits() | mask));
    }
}
