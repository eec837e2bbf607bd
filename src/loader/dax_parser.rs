use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::api::job_graph_dto::{DependencyDto, FileDto, JobDto, JobGraphDto};
use crate::error::{Error, Result};

/// Reads a Pegasus DAX file into the same job-graph DTO the JSON loader produces.
pub fn parse_dax_file(file_path: impl AsRef<Path>) -> Result<JobGraphDto> {
    let data = fs::read_to_string(file_path.as_ref()).map_err(Error::IoError)?;

    parse_dax_str(&data)
}

/**
 * Parses an in-memory DAX document.
 *
 * Every `<job id runtime>` becomes a job whose outputs are its `<uses link="output" size>` files.
 * Every `<child ref>` with its `<parent ref>` elements becomes one dependency entry. Numeric
 * attributes accept a decimal comma and read as `0` when missing or empty.
 *
 * Element names are matched without their namespace, so both plain and Pegasus-namespaced
 * documents load.
 */
pub fn parse_dax_str(data: &str) -> Result<JobGraphDto> {
    let document = Document::parse(data)?;
    let root = document.root_element();

    let jobs = root.descendants().filter(|node| node.has_tag_name("job")).map(job_from_node).collect::<Result<Vec<_>>>()?;
    let dependencies =
        root.descendants().filter(|node| node.has_tag_name("child")).map(dependency_from_node).collect::<Result<Vec<_>>>()?;

    Ok(JobGraphDto { name: root.attribute("name").map(str::to_string), jobs, dependencies })
}

fn job_from_node(job: Node<'_, '_>) -> Result<JobDto> {
    let id = required_attribute(job, "id")?;
    let runtime = parse_decimal(job.attribute("runtime"))
        .map_err(|value| Error::WorkflowError(format!("job '{}' has a non-numeric runtime '{}'", id, value)))?;

    let outputs = job
        .descendants()
        .filter(|uses| uses.has_tag_name("uses") && uses.attribute("link") == Some("output"))
        .map(|uses| -> Result<FileDto> {
            let size = parse_decimal(uses.attribute("size"))
                .map_err(|value| Error::WorkflowError(format!("job '{}' has a non-numeric file size '{}'", id, value)))?;
            Ok(FileDto { name: uses.attribute("file").or_else(|| uses.attribute("name")).map(str::to_string), size })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(JobDto { id: id.to_string(), runtime, outputs })
}

fn dependency_from_node(child: Node<'_, '_>) -> Result<DependencyDto> {
    let parents = child
        .children()
        .filter(|parent| parent.has_tag_name("parent"))
        .map(|parent| required_attribute(parent, "ref").map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    Ok(DependencyDto { child: required_attribute(child, "ref")?.to_string(), parents })
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        Error::WorkflowError(format!("<{}> element at byte {} has no '{}' attribute", node.tag_name().name(), node.range().start, name))
    })
}

/// Lenient number parsing for DAX attributes: `"1,5"` reads as `1.5` and a missing or empty value as `0`.
/// The offending text is returned on failure.
fn parse_decimal(value: Option<&str>) -> std::result::Result<f64, String> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Ok(0.0);
    }
    value.replace(',', ".").parse().map_err(|_| value.to_string())
}
