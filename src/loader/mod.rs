use std::{
    collections::HashMap,
    convert::TryInto,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    camera,
    core::{color::Color, loader::InputParams, rng::Rng, scene::MaterialId, scene::Scene},
    material::{self, Material},
    primitive::{self, Bvh, PrimitiveList},
    renderer::{self, OutputConfig, Renderer},
    texture::{self, Texture},
};

/// Reads a scene JSON and assembles everything the render needs: the scene
/// (materials, BVH aggregate, light list, camera), the renderer, and the
/// output settings.
pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<(Scene, Renderer, OutputConfig)> {
    let json_file = std::fs::File::open(&path)
        .context(format!("scene - can't open '{}'", path.as_ref().display()))?;
    let json_reader = std::io::BufReader::new(json_file);
    let json_value: serde_json::Value = serde_json::from_reader(json_reader)?;

    let config = load_output(&json_value)?;

    let renderer_value = json_value
        .get("renderer")
        .context("scene - there is no 'renderer' field")?;
    let mut renderer_params: InputParams = renderer_value.try_into()?;
    let renderer = renderer::create_renderer_from_params(&mut renderer_params)?;
    let seed = renderer_params.get_int_or("seed", 0) as u64;
    renderer_params.check_unused_keys();

    let camera_value = json_value
        .get("camera")
        .context("scene - there is no 'camera' field")?;
    let mut camera_params: InputParams = camera_value.try_into()?;
    let aspect = config.width as f32 / config.height as f32;
    let camera = camera::create_camera_from_params(&mut camera_params, aspect)?;
    camera_params.check_unused_keys();

    let background = if let Some(value) = json_value.get("background") {
        let error_info = "scene - 'background' should be an array with 3 floats";
        let arr = value.as_array().context(error_info)?;
        if arr.len() != 3 {
            anyhow::bail!(error_info);
        }
        let mut rgb = [0.0f32; 3];
        for (slot, ele) in rgb.iter_mut().zip(arr) {
            *slot = ele.as_f64().context(error_info)? as f32;
        }
        Color::from(rgb)
    } else {
        Color::BLACK
    };

    let mut textures = HashMap::new();
    if let Some(texture_values) = json_value.get("textures") {
        let texture_values = texture_values
            .as_array()
            .context("scene - 'textures' should be an array")?;
        for value in texture_values {
            let mut params: InputParams = value.try_into()?;
            let name = params.get_str("name")?;
            let texture = texture::create_texture_from_params(&mut params)?;
            params.check_unused_keys();
            if textures.insert(name.clone(), texture).is_some() {
                anyhow::bail!(format!("texture - name '{}' is duplicated", name));
            }
        }
    }

    let (materials, material_ids) = load_materials(&json_value, &textures)?;
    let (primitives, lights) = load_primitives(&json_value, &material_ids)?;

    if primitives.is_empty() {
        anyhow::bail!("scene - there are no primitives to render");
    }

    let mut rng = Rng::from_seed(seed);
    let aggregate = Bvh::build(primitives, &mut rng);
    let scene = Scene::new(materials, aggregate, lights, background, camera);

    Ok((scene, renderer, config))
}

fn load_output(json_value: &serde_json::Value) -> anyhow::Result<OutputConfig> {
    let output_value = json_value
        .get("output")
        .context("scene - there is no 'output' field")?;
    let mut params: InputParams = output_value.try_into()?;
    params.set_name("output".into());
    let width = params.get_int("width")? as u32;
    let height = params.get_int("height")? as u32;
    let output_filename = PathBuf::from(params.get_str("file")?);
    params.check_unused_keys();

    if width == 0 || height == 0 {
        anyhow::bail!("output - image dimensions must be positive");
    }

    Ok(OutputConfig {
        width,
        height,
        output_filename,
    })
}

fn load_materials(
    json_value: &serde_json::Value,
    textures: &HashMap<String, Texture>,
) -> anyhow::Result<(Vec<Material>, HashMap<String, MaterialId>)> {
    let material_values = json_value
        .get("materials")
        .context("scene - there is no 'materials' field")?
        .as_array()
        .context("scene - 'materials' should be an array")?;

    let mut materials = Vec::with_capacity(material_values.len());
    let mut material_ids = HashMap::new();
    for value in material_values {
        let mut params: InputParams = value.try_into()?;
        let name = params.get_str("name")?;
        let material = material::create_material_from_params(&mut params, textures)?;
        params.check_unused_keys();

        let id = MaterialId(materials.len());
        materials.push(material);
        if material_ids.insert(name.clone(), id).is_some() {
            anyhow::bail!(format!("material - name '{}' is duplicated", name));
        }
    }

    Ok((materials, material_ids))
}

fn load_primitives(
    json_value: &serde_json::Value,
    material_ids: &HashMap<String, MaterialId>,
) -> anyhow::Result<(Vec<crate::primitive::Primitive>, PrimitiveList)> {
    let primitive_values = json_value
        .get("primitives")
        .context("scene - there is no 'primitives' field")?
        .as_array()
        .context("scene - 'primitives' should be an array")?;

    let mut primitives = Vec::with_capacity(primitive_values.len());
    let mut lights = PrimitiveList::new();
    for value in primitive_values {
        let mut params: InputParams = value.try_into()?;
        let is_light = params.get_bool_or("light", false);
        let primitive = primitive::create_primitive_from_params(&mut params, material_ids)?;
        params.check_unused_keys();

        if is_light {
            lights.push(primitive.clone());
        }
        primitives.push(primitive);
    }

    Ok((primitives, lights))
}
