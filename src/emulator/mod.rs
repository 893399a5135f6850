// Emulator lifecycle — handle construction, startup sequencing, teardown.

pub mod instance;
