use crate::error::{RenderError, RenderResult};

/// Scopes opened around texture and buffer creation. Oversized extents are
/// reported as validation errors rather than out-of-memory, so both count as
/// a failed allocation.
pub(crate) const ALLOCATION_FILTERS: [wgpu::ErrorFilter; 2] =
    [wgpu::ErrorFilter::OutOfMemory, wgpu::ErrorFilter::Validation];

/// Runs `create` inside one wgpu error scope per filter and reports the first
/// error any of them caught.
///
/// Creation calls on a wgpu device never fail directly; validation and
/// out-of-memory errors surface through error scopes instead.
pub(crate) fn scoped<T>(
    device: &wgpu::Device,
    filters: &[wgpu::ErrorFilter],
    create: impl FnOnce() -> T,
) -> Result<T, wgpu::Error> {
    for filter in filters {
        device.push_error_scope(*filter);
    }
    let value = create();

    let mut caught = None;
    for _ in filters {
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            caught.get_or_insert(err);
        }
    }
    match caught {
        Some(err) => Err(err),
        None => Ok(value),
    }
}

pub(crate) fn allocate<T>(
    device: &wgpu::Device,
    resource: &str,
    create: impl FnOnce() -> T,
) -> RenderResult<T> {
    scoped(device, &ALLOCATION_FILTERS, create).map_err(|err| RenderError::Allocation {
        resource: resource.to_owned(),
        message: err.to_string(),
    })
}

pub(crate) fn validated<T>(
    device: &wgpu::Device,
    label: &str,
    create: impl FnOnce() -> T,
) -> RenderResult<T> {
    scoped(device, &[wgpu::ErrorFilter::Validation], create).map_err(|err| {
        RenderError::ShaderBuild {
            label: label.to_owned(),
            message: err.to_string(),
        }
    })
}

pub(crate) fn shader_module(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> RenderResult<wgpu::ShaderModule> {
    validated(device, label, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_catches_oversized_and_out_of_memory() {
        assert!(ALLOCATION_FILTERS.contains(&wgpu::ErrorFilter::OutOfMemory));
        assert!(ALLOCATION_FILTERS.contains(&wgpu::ErrorFilter::Validation));
    }
}
