use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

const PROTO_DIR: &str = "./protos/";
const PROTO_FILE: &str = "./protos/distributed_kv.proto";
const GENERATED_DIR: &str = "./generated/";

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed={}", PROTO_FILE);
    compile_kv_protos()
}

// Master and worker both serve and call every service, so client and server stubs are generated.
fn compile_kv_protos() -> io::Result<()> {
    create_dir_if_missing(GENERATED_DIR)?;
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .out_dir(GENERATED_DIR)
        .compile(&[PROTO_FILE], &[PROTO_DIR])
}

fn create_dir_if_missing<P: AsRef<Path>>(path: P) -> io::Result<()> {
    match fs::create_dir(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}
