/// sysinfo-backed metrics source
use std::path::{Path, PathBuf};

use sysinfo::{Disks, System};

use super::{Category, CollectionError, MetricsSource};

pub struct SysinfoSource {
    sys: System,
    disks: Disks,
    mount_point: PathBuf,
}

impl SysinfoSource {
    /// `mount_point` selects the filesystem reported in the disk section
    pub fn new(mount_point: impl Into<PathBuf>) -> Self {
        Self {
            sys: System::new_all(),
            disks: Disks::new_with_refreshed_list(),
            mount_point: mount_point.into(),
        }
    }

    fn system_section(&mut self) -> Result<String, CollectionError> {
        self.sys.refresh_memory();
        let hostname = System::host_name().ok_or(CollectionError::Unavailable("hostname"))?;

        Ok(format_system_section(
            &hostname,
            self.sys.total_memory(),
            self.sys.used_memory(),
            std::env::consts::OS,
        ))
    }

    fn cpu_section(&mut self) -> Result<String, CollectionError> {
        self.sys.refresh_cpu();
        let cpus = self.sys.cpus();
        let first = cpus.first().ok_or(CollectionError::Unavailable("cpu"))?;

        Ok(format_cpu_section(first.brand().trim(), cpus.len()))
    }

    fn disk_section(&mut self) -> Result<String, CollectionError> {
        self.disks.refresh_list();
        let disk = self
            .disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == self.mount_point.as_path())
            .ok_or_else(|| CollectionError::DiskNotFound(display_path(&self.mount_point)))?;

        Ok(format_disk_section(disk.total_space(), disk.available_space()))
    }
}

impl MetricsSource for SysinfoSource {
    fn collect(&mut self, category: Category) -> Result<String, CollectionError> {
        match category {
            Category::System => self.system_section(),
            Category::Cpu => self.cpu_section(),
            Category::Disk => self.disk_section(),
        }
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// Memory values are bytes
pub fn format_system_section(hostname: &str, total_memory: u64, used_memory: u64, os: &str) -> String {
    format!(
        "Hostname: {}\nTotal Memory: {}\nUsed Memory: {}\nOS: {}\n",
        hostname, total_memory, used_memory, os
    )
}

pub fn format_cpu_section(model: &str, cores: usize) -> String {
    format!("CPU: {}\nCores: {}\n", model, cores)
}

/// Space values are bytes
pub fn format_disk_section(total_space: u64, free_space: u64) -> String {
    format!("Total Disk Space: {}\nFree Disk Space: {}\n", total_space, free_space)
}
