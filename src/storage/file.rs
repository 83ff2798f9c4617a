// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{error::Result, metadata, session};

use super::Storage;

pub(crate) struct File {
    path: PathBuf,
}

impl File {
    pub(crate) fn new<P: AsRef<Path>>(file: P) -> Option<Self> {
        metadata::PROJECT_DIRS
            .as_ref()
            .map(|dirs| Self::with_path(dirs.data_dir().to_owned().join(file)))
    }

    pub(crate) const fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Storage for File {
    async fn get(&mut self) -> Result<Option<session::Data>> {
        match fs::File::open(&self.path) {
            Ok(fp) => Ok(Some(serde_json::from_reader::<fs::File, session::Data>(
                fp,
            )?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&mut self, data: &session::Data) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer(file, data)?;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use crate::{model, session};

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tally-storage-test-{}-{name}.json", std::process::id()))
    }

    fn sample() -> session::Data {
        session::Data::new(
            session::Token::new("abc123".to_owned()).into(),
            model::User {
                id: 1,
                name: "Alice".to_owned(),
                username: "alice".to_owned(),
                email: None,
                role: None,
            },
        )
    }

    #[tokio::test]
    async fn round_trip() -> crate::error::Result<()> {
        let path = scratch_path("round-trip");
        let mut storage = File::with_path(path.clone());

        storage.update(&sample()).await?;
        let loaded = storage.get().await?.ok_or(crate::error::Error::Command)?;
        assert_eq!(loaded.token().expose_secret().as_str(), "abc123");
        assert_eq!(loaded.user().username, "alice");

        storage.clear().await?;
        assert!(storage.get().await?.is_none());
        let _ = fs::remove_file(path);
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_reads_as_absent() -> crate::error::Result<()> {
        let mut storage = File::with_path(scratch_path("missing"));
        assert!(storage.get().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn clear_is_idempotent() -> crate::error::Result<()> {
        let mut storage = File::with_path(scratch_path("idempotent"));
        storage.clear().await?;
        storage.clear().await?;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_record_is_an_error() -> crate::error::Result<()> {
        let path = scratch_path("corrupt");
        fs::write(&path, b"{\"token\":\"abc123\"")?;
        let mut storage = File::with_path(path.clone());
        assert!(storage.get().await.is_err());
        let _ = fs::remove_file(path);
        Ok(())
    }
}
