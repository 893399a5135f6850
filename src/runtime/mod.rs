// Runtime discovery — locating the JVM the emulator runs on.

pub mod java;
