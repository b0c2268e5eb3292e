use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{
    crate_description, crate_name, crate_version, App, AppSettings, Arg, ArgMatches, SubCommand,
};
use nspack_cdn::{CdnClient, Decryptor, DeviceConfig, HactoolDecryptor, HEADER_BLOB_NAME};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = App::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("pack")
                .about("Pack a directory of content files into a container")
                .arg(
                    Arg::with_name("dir")
                        .help("Directory to pack")
                        .required(true)
                        .value_name("DIR"),
                )
                .arg(
                    Arg::with_name("output")
                        .help("Container file to write")
                        .required(true)
                        .value_name("FILE"),
                ),
        )
        .subcommand(
            SubCommand::with_name("meta")
                .about("Decode a content-metadata record")
                .arg(
                    Arg::with_name("record")
                        .help("Content-metadata record file")
                        .required(true)
                        .value_name("FILE"),
                )
                .arg(
                    Arg::with_name("header")
                        .help("Header blob produced by the decryption tool")
                        .required(true)
                        .value_name("FILE"),
                )
                .arg(
                    Arg::with_name("xml")
                        .help("Write the installer XML to this file")
                        .long("xml")
                        .takes_value(true)
                        .value_name("FILE"),
                )
                .arg(
                    Arg::with_name("nca-name")
                        .help("File name of the metadata content archive (for the XML's Meta entry)")
                        .long("nca-name")
                        .takes_value(true)
                        .value_name("NAME"),
                ),
        )
        .subcommand(
            SubCommand::with_name("ticket")
                .about("Patch a ticket template with title key material")
                .arg(
                    Arg::with_name("template")
                        .help("Ticket template file")
                        .required(true)
                        .value_name("FILE"),
                )
                .arg(
                    Arg::with_name("output")
                        .help("Ticket file to write")
                        .required(true)
                        .value_name("FILE"),
                )
                .arg(
                    Arg::with_name("title-key")
                        .long("title-key")
                        .required(true)
                        .takes_value(true)
                        .value_name("HEX16"),
                )
                .arg(
                    Arg::with_name("key-revision")
                        .long("key-revision")
                        .required(true)
                        .takes_value(true)
                        .value_name("HEX1"),
                )
                .arg(
                    Arg::with_name("rights-id")
                        .long("rights-id")
                        .required(true)
                        .takes_value(true)
                        .value_name("HEX16"),
                ),
        )
        .subcommand(
            SubCommand::with_name("fetch")
                .about("Download a title and pack it into a container")
                .arg(
                    Arg::with_name("title-id")
                        .help("16-digit title id")
                        .required(true)
                        .value_name("TITLEID"),
                )
                .arg(
                    Arg::with_name("title-version")
                        .help("Title version (defaults to 0)")
                        .value_name("VERSION"),
                )
                .arg(
                    Arg::with_name("config")
                        .help("Device config file")
                        .long("config")
                        .short("c")
                        .required(true)
                        .takes_value(true)
                        .value_name("FILE"),
                )
                .arg(
                    Arg::with_name("hactool")
                        .help("Decryption tool binary (defaults to 'hactool' on PATH)")
                        .long("hactool")
                        .takes_value(true)
                        .value_name("BIN"),
                )
                .arg(
                    Arg::with_name("ticket-template")
                        .help("Generate a ticket from this template")
                        .long("ticket-template")
                        .takes_value(true)
                        .value_name("FILE"),
                )
                .arg(
                    Arg::with_name("out")
                        .help("Working directory (defaults to '.')")
                        .long("out")
                        .short("o")
                        .takes_value(true)
                        .value_name("DIR"),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("pack") {
        nspack::pack_directory(
            matches.value_of("dir").unwrap(),
            matches.value_of("output").unwrap(),
        )?;
    } else if let Some(matches) = matches.subcommand_matches("meta") {
        meta(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("ticket") {
        nspack::generate_ticket(
            matches.value_of("template").unwrap(),
            matches.value_of("output").unwrap(),
            matches.value_of("title-key").unwrap(),
            matches.value_of("key-revision").unwrap(),
            matches.value_of("rights-id").unwrap(),
        )?;
    } else if let Some(matches) = matches.subcommand_matches("fetch") {
        fetch(matches)?;
    }

    Ok(())
}

fn meta(matches: &ArgMatches) -> anyhow::Result<()> {
    let meta = nspack::load_meta(
        matches.value_of("record").unwrap(),
        matches.value_of("header").unwrap(),
    )?;

    println!("{} {} v{}", meta.kind, meta.title_id, meta.version);
    println!("  required system version: {}", meta.required_system_version);
    println!("  master key revision: {}", meta.master_key_revision);
    for entry in &meta.entries {
        println!("  {} {} size {}", entry.kind, entry.id, entry.size);
    }

    if let Some(xml) = matches.value_of("xml") {
        let nca_name = matches
            .value_of("nca-name")
            .context("--xml requires --nca-name")?;
        nspack::write_meta_xml(&meta, nca_name, xml)?;
    }
    Ok(())
}

fn first_file(dir: &Path) -> anyhow::Result<PathBuf> {
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        if entry.metadata()?.is_file() {
            return Ok(entry.path());
        }
    }
    bail!("no files in {}", dir.display());
}

fn fetch(matches: &ArgMatches) -> anyhow::Result<()> {
    let title_id = matches.value_of("title-id").unwrap();
    let version: u32 = matches
        .value_of("title-version")
        .unwrap_or("0")
        .parse()
        .context("title version must be a decimal integer")?;
    let out_dir = Path::new(matches.value_of("out").unwrap_or("."));

    let config = DeviceConfig::open(matches.value_of("config").unwrap())?;
    let client = CdnClient::new(&config)?;
    let decryptor = HactoolDecryptor::new(matches.value_of("hactool").unwrap_or("hactool"));

    // Everything staged under this directory ends up in the container.
    let stage = out_dir.join(title_id);
    fs::create_dir_all(&stage).with_context(|| format!("creating {}", stage.display()))?;

    let meta_id = client.meta_content_id(title_id, version)?;
    let meta_nca_name = format!("{meta_id}.cnmt.nca");
    client.download_meta(&meta_id, &stage.join(&meta_nca_name))?;

    let extracted = out_dir.join(format!("{meta_id}.extracted"));
    decryptor.decrypt(&stage.join(&meta_nca_name), &extracted)?;

    // The decryption tool drops the record into the first section
    // directory and the header blob next to it.
    let record_path = first_file(&extracted.join("section0"))?;
    let meta = nspack::load_meta(&record_path, extracted.join(HEADER_BLOB_NAME))?;

    for entry in &meta.entries {
        client.download_content(&entry.id, &stage.join(format!("{}.nca", entry.id)))?;
    }

    nspack::write_meta_xml(
        &meta,
        &meta_nca_name,
        stage.join(format!("{meta_id}.cnmt.xml")),
    )?;

    if let Some(template) = matches.value_of("ticket-template") {
        let rights_id =
            nspack_core::ticket::rights_id(&meta.title_id, &meta.master_key_revision);
        let cetk = out_dir.join(format!("{rights_id}.cetk"));
        client.download_cetk(&rights_id, &cetk)?;

        let title_key = nspack::title_key_from_cetk(&cetk)?;
        nspack::generate_ticket(
            template,
            stage.join(format!("{rights_id}.tik")),
            &title_key,
            &meta.master_key_revision,
            &rights_id,
        )?;
    }

    let container = out_dir.join(format!("{title_id}.nsp"));
    nspack::pack_directory(&stage, &container)?;
    println!("{}", container.display());
    Ok(())
}
