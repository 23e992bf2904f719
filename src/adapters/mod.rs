// Adapters layer: concrete loaders backed by the operating system.

pub mod dynamic;

pub use dynamic::DynamicLibraryLoader;
