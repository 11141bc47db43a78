//! Camera discovery and selection by index.

use nokhwa::query;
use nokhwa::utils::{ApiBackend, CameraInfo as DeviceDescriptor};

use super::types::{CameraError, CameraInfo};

/// Every camera that can be opened by a numeric index.
///
/// Backends that name devices by path or UID only are skipped, since the
/// capture side can only select cameras by number. No cameras is an empty
/// list, not an error.
pub fn list_devices() -> Result<Vec<CameraInfo>, CameraError> {
    let devices = query(ApiBackend::Auto).map_err(|e| CameraError::QueryFailed(e.to_string()))?;
    Ok(devices.iter().filter_map(selectable).collect())
}

/// Look up the camera that `index` refers to.
pub fn find_device(index: u32) -> Result<CameraInfo, CameraError> {
    list_devices()?
        .into_iter()
        .find(|d| d.index == index)
        .ok_or(CameraError::DeviceNotFound(index))
}

fn selectable(device: &DeviceDescriptor) -> Option<CameraInfo> {
    match device.index().as_index() {
        Ok(index) => Some(CameraInfo {
            index,
            name: device.human_name(),
            description: device.description().to_string(),
        }),
        Err(_) => {
            log::debug!(
                "Skipping camera '{}' without a numeric index ({})",
                device.human_name(),
                device.index()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nokhwa::utils::CameraIndex;

    #[test]
    fn test_numeric_index_is_kept() {
        let device = DeviceDescriptor::new("Webcam", "USB", "", CameraIndex::Index(3));
        let info = selectable(&device).unwrap();
        assert_eq!(info.index, 3);
        assert_eq!(info.name, "Webcam");
        assert_eq!(info.description, "USB");
    }

    #[test]
    fn test_string_index_is_skipped_not_zero() {
        let device = DeviceDescriptor::new(
            "Virtual",
            "Loopback",
            "",
            CameraIndex::String("not-a-number".to_string()),
        );
        assert!(selectable(&device).is_none());
    }

    #[test]
    fn test_list_devices_does_not_error() {
        // A machine without cameras gets an empty list; only a broken
        // backend may fail the query itself
        match list_devices() {
            Ok(devices) => {
                let mut indices: Vec<u32> = devices.iter().map(|d| d.index).collect();
                indices.sort_unstable();
                indices.dedup();
                assert_eq!(indices.len(), devices.len());
            }
            Err(CameraError::QueryFailed(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}
