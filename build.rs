fn main() {
    println!("cargo::rerun-if-changed=schemas/library.graphql");

    cynic_codegen::register_schema("library")
        .from_sdl_file("schemas/library.graphql")
        .expect("schemas/library.graphql should exist")
        .as_default()
        .expect("schema should be registered as the default");
}
