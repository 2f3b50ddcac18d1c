use crate::errors::CertError;
use crate::models::Certificate;
use crate::storage::{self, CertificateStore, Upsert};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

const RULE: &str = "==================================================";
const SHORT_RULE: &str = "==============================";
const ORG: &str = "E-Cell UCER";
const LIST_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Search,
    Exit,
}

impl MenuChoice {
    pub fn parse(s: &str) -> Option<MenuChoice> {
        match s.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::View),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Line-oriented terminal session; stdin/stdout in the binary, buffers in tests.
pub struct Session<R, W> {
    input: R,
    out: W,
    store: CertificateStore,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, store: CertificateStore) -> Self {
        Session { input, out, store }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Prints the prompt and returns the line without its terminator;
    /// `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let end = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(end);
        Ok(Some(line))
    }

    fn read_answer(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self.read_line(prompt)?.map(|l| l.trim().to_string()))
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        Ok(self.read_answer(prompt)?.ok_or(CertError::InputClosed)?)
    }

    /// Only a bare `y`/`Y` confirms; the answer is not trimmed.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.read_line(prompt)?.ok_or(CertError::InputClosed)?;
        Ok(answer.to_lowercase() == "y")
    }

    /// Menu loop until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{RULE}")?;
            writeln!(self.out, "🎓 {ORG} Certificate Management")?;
            writeln!(self.out, "{RULE}")?;
            writeln!(self.out, "1. Add New Certificate")?;
            writeln!(self.out, "2. View All Certificates")?;
            writeln!(self.out, "3. Search Certificate")?;
            writeln!(self.out, "4. Exit")?;

            let Some(answer) = self.read_answer("\nSelect an option (1-4): ")? else {
                writeln!(self.out)?;
                return Ok(());
            };
            match MenuChoice::parse(&answer) {
                Some(MenuChoice::Add) => self.add_certificate()?,
                Some(MenuChoice::View) => self.view_certificates()?,
                Some(MenuChoice::Search) => self.search_certificate()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.out, "👋 Thank you for using Certificate Management Tool!")?;
                    return Ok(());
                }
                None => writeln!(self.out, "❌ Invalid option! Please try again.")?,
            }
        }
    }

    fn prompt_certificate(&mut self) -> Result<Certificate> {
        Ok(Certificate {
            cert_id: self.ask("Enter Certificate ID (e.g., PITCHDECK25-001): ")?,
            name: self.ask("Enter Participant Name: ")?,
            team_name: self.ask("Enter Team Name: ")?,
            college: self.ask("Enter College Name: ")?,
            startup_idea: self.ask("Enter Startup Idea: ")?,
            email: self.ask("Enter Email (optional): ")?,
            phone: self.ask("Enter Phone (optional): ")?,
            event: self.ask("Enter Event Name: ")?,
            date: self.ask("Enter Event Date (e.g., 29-08-2025): ")?,
            extra: Default::default(),
        })
    }

    pub fn add_certificate(&mut self) -> Result<()> {
        writeln!(self.out, "🎓 {ORG} Certificate Addition Tool")?;
        writeln!(self.out, "{RULE}")?;
        let cert = self.prompt_certificate()?;
        let mut certs = self.store.load_all()?;

        if storage::find_exact(&certs, &cert.cert_id).is_some() {
            writeln!(self.out, "\n⚠️  Certificate ID '{}' already exists!", cert.cert_id)?;
            if !self.confirm("Do you want to update it? (y/n): ")? {
                writeln!(self.out, "Certificate not added.")?;
                return Ok(());
            }
        }

        let cert_id = cert.cert_id.clone();
        let replaced = storage::upsert(&mut certs, cert) == Upsert::Replaced;
        self.store.save_all(&certs)?;
        info!(cert_id = %cert_id, replaced, total = certs.len(), "certificate saved");

        writeln!(self.out, "\n✅ Certificate '{cert_id}' added successfully!")?;
        writeln!(self.out, "Total certificates: {}", certs.len())?;
        Ok(())
    }

    pub fn view_certificates(&mut self) -> Result<()> {
        let Some(certs) = self.store.load()? else {
            writeln!(self.out, "No certificates found!")?;
            return Ok(());
        };

        writeln!(self.out, "\n📋 Total Certificates: {}", certs.len())?;
        writeln!(self.out, "{RULE}")?;
        for (i, cert) in certs.iter().take(LIST_LIMIT).enumerate() {
            writeln!(self.out, "{}. {}", i + 1, cert)?;
        }
        if certs.len() > LIST_LIMIT {
            writeln!(self.out, "... and {} more certificates", certs.len() - LIST_LIMIT)?;
        }
        Ok(())
    }

    pub fn search_certificate(&mut self) -> Result<()> {
        let cert_id = self.ask("Enter Certificate ID to search: ")?;
        let Some(certs) = self.store.load()? else {
            writeln!(self.out, "No certificates found!")?;
            return Ok(());
        };

        match storage::search(&certs, &cert_id) {
            Some(cert) => {
                writeln!(self.out, "\n✅ Certificate Found!")?;
                writeln!(self.out, "{SHORT_RULE}")?;
                for (key, value) in cert.fields() {
                    writeln!(self.out, "{key}: {value}")?;
                }
            }
            None => writeln!(self.out, "\n❌ Certificate '{cert_id}' not found!")?,
        }
        Ok(())
    }
}
