/// Integration tests resolving assemblies against folders of real `.nupkg` archives.
use nux_pm::{
    AggregateRepository, AssemblyResolver, BufferedConsole, FolderRepository, NuxConfig,
    Package, PackageSource, PhysicalFileSystem,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn write_nupkg(dir: &Path, file_name: &str, nuspec: Option<(&str, &str)>, files: &[&str]) {
    let file = File::create(dir.join(file_name)).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(b"<Types />").unwrap();
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(b"<Relationships />").unwrap();

    if let Some((id, version)) = nuspec {
        zip.start_file(format!("{}.nuspec", id), options).unwrap();
        write!(
            zip,
            "<?xml version=\"1.0\"?><package><metadata><id>{}</id><version>{}</version></metadata></package>",
            id, version
        )
        .unwrap();
    }

    for path in files {
        zip.start_file(*path, options).unwrap();
        zip.write_all(b"MZ").unwrap();
    }

    zip.finish().unwrap();
}

fn feed() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_nupkg(
        temp_dir.path(),
        "a-first.nupkg",
        Some(("Alpha", "1.0.0")),
        &["lib/net45/A.dll", "lib/net45/A.xml"],
    );
    write_nupkg(
        temp_dir.path(),
        "b-second.nupkg",
        Some(("Beta", "2.1.0")),
        &["lib/net45/B.dll", "lib/net40/a.dll"],
    );
    write_nupkg(temp_dir.path(), "Gamma.3.0.0-rc1.nupkg", None, &["tools/C.exe"]);
    std::fs::write(temp_dir.path().join("notes.txt"), "not a package").unwrap();
    temp_dir
}

#[test]
fn test_folder_repository_reads_identity() {
    let feed = feed();
    let repo = FolderRepository::open(feed.path()).unwrap();

    assert_eq!(repo.count().unwrap(), 3);
    let packages: Vec<(String, String)> = repo
        .packages()
        .unwrap()
        .map(|p| {
            let p = p.unwrap();
            (p.id().to_string(), p.version().to_string())
        })
        .collect();
    assert_eq!(
        packages,
        vec![
            ("Gamma".to_string(), "3.0.0-rc1".to_string()),
            ("Alpha".to_string(), "1.0.0".to_string()),
            ("Beta".to_string(), "2.1.0".to_string()),
        ]
    );
}

#[test]
fn test_folder_package_files_skip_archive_metadata() {
    let feed = feed();
    let repo = FolderRepository::open(feed.path()).unwrap();
    let alpha = repo
        .packages()
        .unwrap()
        .map(|p| p.unwrap())
        .find(|p| p.id() == "Alpha")
        .unwrap();

    let files: Vec<String> = alpha.files().unwrap().into_iter().map(|f| f.path).collect();
    assert_eq!(files, vec!["lib/net45/A.dll", "lib/net45/A.xml"]);
}

#[test]
fn test_resolve_against_folder() {
    let feed = feed();
    let out = TempDir::new().unwrap();
    let console = Arc::new(BufferedConsole::new());
    let resolver = AssemblyResolver::new(
        ["A.dll", "B.dll", "C.exe", "D.dll"],
        Arc::new(FolderRepository::open(feed.path()).unwrap()),
        Arc::new(PhysicalFileSystem::new(out.path())),
        console.clone(),
    )
    .unwrap();

    let mapping = resolver.resolve(false).unwrap();
    let report = mapping.to_report();

    let ids = |name: &str| -> Vec<String> {
        report.assemblies[name].iter().map(|p| p.id.clone()).collect()
    };
    assert_eq!(ids("A.dll"), vec!["Alpha", "Beta"]);
    assert_eq!(ids("B.dll"), vec!["Beta"]);
    assert_eq!(ids("C.exe"), vec!["Gamma"]);
    assert!(ids("D.dll").is_empty());
    assert_eq!(console.lines().len(), 3);

    mapping.write_packages_config(Path::new("packages.config")).unwrap();
    let written = std::fs::read_to_string(out.path().join("packages.config")).unwrap();
    assert!(written.contains("<package id=\"Alpha\" version=\"1.0.0\" />"));
    assert!(written.contains("<package id=\"Beta\" version=\"2.1.0\" />"));
    assert!(written.contains("<package id=\"Gamma\" version=\"3.0.0-rc1\" />"));
}

#[test]
fn test_resolve_across_several_folders() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_nupkg(first.path(), "one.nupkg", Some(("One", "1.0.0")), &["lib/Shared.dll"]);
    write_nupkg(second.path(), "two.nupkg", Some(("Two", "1.0.0")), &["lib/Shared.dll"]);

    let mut aggregate = AggregateRepository::new();
    aggregate.add_repository(Arc::new(FolderRepository::open(first.path()).unwrap()));
    aggregate.add_repository(Arc::new(FolderRepository::open(second.path()).unwrap()));
    let aggregate = Arc::new(aggregate);

    let console = Arc::new(BufferedConsole::new());
    let resolver = AssemblyResolver::new(
        ["shared.dll"],
        aggregate.clone(),
        Arc::new(PhysicalFileSystem::new(first.path())),
        console.clone(),
    )
    .unwrap();

    let first_only = resolver.resolve(false).unwrap();
    assert_eq!(first_only.to_report().assemblies["shared.dll"].len(), 1);
    assert_eq!(first_only.to_report().assemblies["shared.dll"][0].id, "One");

    let all = resolver.resolve(true).unwrap();
    let ids: Vec<String> = all.to_report().assemblies["shared.dll"]
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(ids, vec!["One", "Two"]);
    assert_eq!(
        console.lines(),
        vec![
            "Checking package 1 of 2",
            "Checking package 1 of 2",
            "Checking package 2 of 2",
        ]
    );
}

#[test]
fn test_config_sources_open_as_folders() {
    let project = TempDir::new().unwrap();
    let packages = project.path().join("packages");
    std::fs::create_dir_all(&packages).unwrap();
    write_nupkg(&packages, "x.nupkg", Some(("X", "0.1.0")), &["lib/X.dll"]);
    std::fs::write(
        project.path().join("nux.toml"),
        "exhaustive = true\n[[sources]]\npath = \"packages\"\n",
    )
    .unwrap();

    let config = NuxConfig::load(project.path()).unwrap().unwrap();
    let sources = config.source_paths();
    assert_eq!(sources, vec![packages.clone()]);

    let repo = FolderRepository::open(&sources[0]).unwrap();
    assert_eq!(repo.count().unwrap(), 1);
}
