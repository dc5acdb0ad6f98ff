mod controls;
mod keyboard;
mod pointer;

use crate::app::Shared;

pub fn wire_all(shared: &Shared) {
    pointer::wire_pointer_handlers(shared);
    keyboard::wire_keyboard_handlers(shared);
    controls::wire_control_handlers(shared);
}
