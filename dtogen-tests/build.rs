fn main() {
    dtogen_build::generate_dtos()
        .scan_path("src/")
        .dto_derives(["Debug", "Clone", "PartialEq", "serde::Serialize"])
        .run()
        .expect("Failed to generate DTOs");
}
