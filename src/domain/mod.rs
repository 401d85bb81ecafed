pub mod output_dir;
pub mod size_spec;
pub mod source_image;
pub mod transparency;
pub mod variant_cache;
