pub mod testing;
pub mod workdir;
