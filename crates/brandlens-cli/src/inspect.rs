use std::str::FromStr;

use brandlens_core::AppConfig;
use brandlens_store::{ModelStore, ModelType};

pub fn brands(config: &AppConfig) -> anyhow::Result<()> {
    let store = ModelStore::open(&config.models_dir)?;
    let followers = brandlens_core::load_followers(&config.followers_path)?;
    let brands = brandlens_store::list_brands(&store, &followers)?;

    if brands.is_empty() {
        println!("no stored models in {}", config.models_dir.display());
        return Ok(());
    }
    for brand in brands {
        println!(
            "{} ({}) followers={} models=[{}]",
            brand.brand_id,
            brand.brand_name,
            brand.followers,
            brand.available_models.join(", ")
        );
    }
    Ok(())
}

pub fn show(config: &AppConfig, brand_id: &str, model_type: &str) -> anyhow::Result<()> {
    let store = ModelStore::open(&config.models_dir)?;
    let model_type = ModelType::from_str(model_type)?;
    let artifact = store.load(brand_id, model_type)?;
    println!("{}", serde_json::to_string_pretty(&artifact)?);
    Ok(())
}

pub fn models(config: &AppConfig) -> anyhow::Result<()> {
    let store = ModelStore::open(&config.models_dir)?;
    for file in brandlens_store::list_model_files(&store)? {
        println!("{} ({} bytes)", file.filename, file.size_bytes);
    }
    Ok(())
}
