// Process management — launching the emulator and supervising the child.

pub mod launcher;
pub mod supervisor;
