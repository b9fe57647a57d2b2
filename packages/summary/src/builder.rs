//! Report structure: turns fetched records into a LaTeX document.
//!
//! The builder filters repositories and gists to the reporting window once,
//! at construction, and then appends the Introduction, Projects and Summary
//! chapters in that order. [`DocBuilder::finish`] hands back the finished
//! document; nothing is added after that.

use chrono::{DateTime, Datelike, Local, Utc};

use crate::format::{get_amount, get_size};
use crate::latex::{bar_chart, escape, Command, Document, Element, Package};
use crate::snippets;
use crate::timerange::TimeRange;
use crate::types::{Gist, Repository, UserInfo};

/// Catcode switch so chronosys internals can be redefined.
const CATCODE_AT_LETTER: &str = r"\catcode`\@=11";

/// Three-letter month names on the timeline.
const CHRONO_MONTHS: &str = r"\def\chron@selectmonth#1{\ifcase#1\or Jan\or Feb\or Mar\or Apr\or May\or Jun\or Jul\or Aug\or Sep\or Oct\or Nov\or Dec\fi}";

/// Builds the report for one user.
pub struct DocBuilder {
    login: String,
    user: Option<UserInfo>,
    range: TimeRange,
    repos: Vec<Repository>,
    gists: Vec<Gist>,
    now: DateTime<Local>,
    document: Document,
}

impl DocBuilder {
    /// Create a builder and the document preamble.
    ///
    /// `login` is the requested username; it stands in for the profile when
    /// `user` could not be fetched. Repositories and gists outside `range`
    /// are dropped here.
    pub fn new(
        login: &str,
        user: Option<UserInfo>,
        repos: &[Repository],
        gists: &[Gist],
        range: TimeRange,
        now: DateTime<Local>,
    ) -> Self {
        let login = user.as_ref().map_or(login, |u| u.login.as_str()).to_string();
        let repos = range.filter(repos);
        let gists = range.filter(gists);
        tracing::debug!(repos = repos.len(), gists = gists.len(), %range, "records in range");

        let mut document = Document::new("scrreprt", &["a4paper", "12pt"]);
        document.packages = vec![
            Package::new("fontenc").with_option("T1"),
            Package::new("inputenc").with_option("utf8"),
            Package::new("lmodern"),
            Package::new("textcomp"),
            Package::new("babel").with_option("english"),
            Package::new("xcolor"),
            Package::new("url"),
            Package::new("chronosys"),
            Package::new("fontawesome"),
            Package::new("pgfplots"),
        ];
        document.preamble = vec![
            Element::raw(r"\pgfplotsset{compat=1.16}"),
            Element::Command(Command::new("title").arg(format!(
                "Project overview of {} {} - {}",
                escape(&login),
                range.start_label(),
                range.end_label()
            ))),
            Element::Command(Command::new("author").arg("GitHub summary generator")),
            Element::Command(Command::new("date").arg(now.format("%B %d, %Y").to_string())),
        ];
        document.body = vec![
            Element::Command(Command::new("maketitle")),
            Element::Command(Command::new("tableofcontents")),
            Element::Command(Command::new("newpage")),
        ];

        Self {
            login,
            user,
            range,
            repos,
            gists,
            now,
            document,
        }
    }

    /// Repositories inside the reporting window, in fetch order.
    pub fn repos(&self) -> &[Repository] {
        &self.repos
    }

    /// Gists inside the reporting window, in fetch order.
    pub fn gists(&self) -> &[Gist] {
        &self.gists
    }

    /// Append all chapters.
    pub fn generate_structure(&mut self) {
        self.append_introduction();
        self.append_projects();
        self.append_summary();
    }

    /// Append the Introduction chapter.
    pub fn append_introduction(&mut self) {
        let text = snippets::intro(
            &escape(self.display_name()),
            &self.range.start_label(),
            &self.range.end_label(),
            self.user.as_ref().map(|u| u.url.as_str()),
        );
        self.document
            .body
            .push(Element::chapter("Introduction", vec![Element::raw(text)]));
    }

    /// Append the Projects chapter: count, timeline, one section per repository.
    pub fn append_projects(&mut self) {
        let count = self
            .user
            .as_ref()
            .map_or(self.repos.len() as u64, |u| u.repos);
        let mut content = vec![
            Element::raw(snippets::projects(
                &escape(self.display_name()),
                &self.range.start_label(),
                &self.range.end_label(),
                count,
            )),
            Element::section("Timeline", self.timeline()),
        ];
        content.extend(self.repos.iter().map(|repo| self.repo_section(repo)));
        if !self.gists.is_empty() {
            content.push(self.gists_section());
        }
        self.document.body.push(Element::chapter("Projects", content));
    }

    /// Append the Summary chapter with the language distribution.
    pub fn append_summary(&mut self) {
        let languages = aggregate_languages(&self.repos);

        let mut language_content = Vec::new();
        if !languages.is_empty() {
            language_content.push(Element::Itemize(
                languages
                    .iter()
                    .map(|(name, bytes)| {
                        vec![
                            Element::text(name),
                            Element::raw(format!(r"\hfill {}", get_size(*bytes))),
                        ]
                    })
                    .collect(),
            ));
            language_content.push(Element::Figure {
                position: "htbp".to_string(),
                content: vec![bar_chart(&languages, "Language", "Code in bytes")],
                caption: Some("Language distribution".to_string()),
            });
        }

        self.document.body.push(Element::chapter(
            "Summary",
            vec![
                Element::section("Languages", language_content),
                Element::section(
                    "Technologies",
                    vec![Element::text("Currently not available!")],
                ),
            ],
        ));
    }

    /// Finish building and return the document.
    pub fn finish(self) -> Document {
        self.document
    }

    fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map_or(self.login.as_str(), UserInfo::display_name)
    }

    /// Chronology with one event per repository created inside the span.
    fn timeline(&self) -> Vec<Element> {
        let (start, end) = self.range.timeline_years();
        let mut elements = vec![
            Element::Command(
                Command::new("startchronology")
                    .option(format!("startyear={start}"))
                    .option(format!("stopyear={end}"))
                    .option("arrow=false"),
            ),
            Element::raw(CATCODE_AT_LETTER),
            Element::raw(CHRONO_MONTHS),
        ];
        for repo in &self.repos {
            let year = repo.created.year();
            if year >= start && year < end {
                elements.push(Element::Command(
                    Command::new("chronoevent")
                        .option("year=false")
                        .arg(repo.created.format("%-d/%-m/%Y").to_string())
                        .arg(escape(&repo.name)),
                ));
            }
        }
        elements.push(Element::Command(Command::new("stopchronology")));
        elements
    }

    fn repo_section(&self, repo: &Repository) -> Element {
        let license = repo.license.as_deref().unwrap_or("No license");
        let statistics = format!(
            r"\faStar~{} \quad \faEye~{} \quad \faShareAlt~{} \quad \faDatabase~{} \quad {}",
            get_amount(repo.stars),
            get_amount(repo.watchers),
            get_amount(repo.forks),
            get_size(repo.size_bytes()),
            escape(license)
        );

        let mut description = match repo.description.as_deref() {
            Some(text) if !text.trim().is_empty() => vec![Element::text(text)],
            _ => vec![Element::text("No description available.")],
        };
        description.push(Element::Command(
            Command::new("footnote").arg(format!(r"\url{{{}}}", repo.url)),
        ));
        description.push(Element::colored(
            "gray",
            &format!("since {}", repo.created.format("%Y-%m-%d %H:%M:%S")),
        ));

        let mut content = vec![
            Element::subsection("Statistics", vec![Element::raw(statistics)]),
            Element::subsection("Description", description),
        ];

        if let Some(top) = repo.top_language() {
            let mut rows = vec![vec![
                Element::text("Top used language:"),
                Element::bold(&top.name),
            ]];
            let others = repo.other_languages();
            if !others.is_empty() {
                let names = others
                    .iter()
                    .map(|l| l.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                rows.push(vec![Element::text("Other languages:"), Element::text(names)]);
            }
            content.push(Element::subsection(
                "Languages",
                vec![Element::Tabular {
                    spec: "l l".to_string(),
                    rows,
                }],
            ));
        }

        let now_utc = self.now.with_timezone(&Utc);
        let activity = vec![
            ("Creation:", repo.created.format("%Y-%m-%d").to_string()),
            ("Last update:", repo.updated.format("%Y-%m-%d").to_string()),
            (
                "Development:",
                format!("{} days", (repo.updated - repo.created).num_days()),
            ),
            (
                "Inactive since:",
                format!("{} days", (now_utc - repo.updated).num_days()),
            ),
        ];
        content.push(Element::subsection(
            "Activity",
            vec![Element::Tabular {
                spec: "l l".to_string(),
                rows: activity
                    .into_iter()
                    .map(|(label, value)| vec![Element::text(label), Element::text(value)])
                    .collect(),
            }],
        ));

        Element::section(&repo.name, content)
    }

    fn gists_section(&self) -> Element {
        let items = self
            .gists
            .iter()
            .map(|gist| {
                let description = gist
                    .description
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or(gist.id.as_str());
                let files = gist.files.keys().cloned().collect::<Vec<_>>().join(", ");
                vec![
                    Element::bold(description),
                    Element::Command(
                        Command::new("footnote").arg(format!(r"\url{{{}}}", gist.url)),
                    ),
                    Element::text(format!("({files})")),
                ]
            })
            .collect();
        Element::section("Gists", vec![Element::Itemize(items)])
    }
}

/// Total bytes per language across repositories, in order of first appearance.
pub fn aggregate_languages(repos: &[Repository]) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = Vec::new();
    for language in repos.iter().flat_map(|r| &r.languages) {
        match totals.iter_mut().find(|(name, _)| *name == language.name) {
            Some((_, bytes)) => *bytes += language.bytes,
            None => totals.push((language.name.clone(), language.bytes)),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GistFile, Language};
    use chrono::{NaiveDate, TimeZone};
    use std::collections::BTreeMap;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 39, 1).unwrap()
    }

    fn test_user() -> UserInfo {
        UserInfo {
            login: "test".to_string(),
            url: "https://test.github.com/test".to_string(),
            name: Some("Test".to_string()),
            followers: 32,
            following: 10,
            created: utc(2020, 2, 5),
            repos: 8,
        }
    }

    fn test_repo(name: &str, updated: DateTime<Utc>, languages: Vec<Language>) -> Repository {
        Repository {
            name: name.to_string(),
            url: format!("https://test.github.com/test/{name}"),
            description: Some("Hello this is a test project!".to_string()),
            forked: false,
            languages,
            size: 51118,
            license: Some("MIT".to_string()),
            forks: 2,
            stars: 3,
            watchers: 1,
            created: utc(2020, 4, 20),
            updated,
        }
    }

    fn dates_range() -> TimeRange {
        TimeRange::Dates {
            start: NaiveDate::from_ymd_opt(2020, 1, 9).unwrap(),
            end: NaiveDate::from_ymd_opt(2021, 6, 8).unwrap(),
        }
    }

    fn now() -> DateTime<Local> {
        Utc.with_ymd_and_hms(2021, 6, 8, 12, 0, 0)
            .unwrap()
            .with_timezone(&Local)
    }

    fn build(repos: &[Repository], gists: &[Gist]) -> String {
        let mut builder =
            DocBuilder::new("test", Some(test_user()), repos, gists, dates_range(), now());
        builder.generate_structure();
        builder.finish().dumps()
    }

    #[test]
    fn test_aggregate_languages_sums_by_name() {
        let repos = vec![
            test_repo(
                "a",
                utc(2020, 5, 1),
                vec![Language::new("Rust", 100), Language::new("Shell", 5)],
            ),
            test_repo(
                "b",
                utc(2020, 6, 1),
                vec![Language::new("Python", 40), Language::new("Rust", 20)],
            ),
        ];

        let totals = aggregate_languages(&repos);
        assert_eq!(
            totals,
            vec![
                ("Rust".to_string(), 120),
                ("Shell".to_string(), 5),
                ("Python".to_string(), 40),
            ]
        );
    }

    #[test]
    fn test_filters_records_outside_range() {
        let repos = vec![
            test_repo("inside", utc(2020, 4, 30), Vec::new()),
            test_repo("outside", utc(2022, 1, 1), Vec::new()),
        ];
        let builder = DocBuilder::new("test", None, &repos, &[], dates_range(), now());

        assert_eq!(builder.repos().len(), 1);
        assert_eq!(builder.repos()[0].name, "inside");
        assert_eq!(repos.len(), 2);
    }

    #[test]
    fn test_document_structure_in_order() {
        let repos = vec![test_repo(
            "test-project",
            utc(2020, 4, 30),
            vec![
                Language::new("Typescript", 54678),
                Language::new("HTML", 3465),
                Language::new("CSS", 2376),
            ],
        )];
        let tex = build(&repos, &[]);

        let order = [
            r"\documentclass[a4paper,12pt]{scrreprt}",
            r"\title{Project overview of test 2020-01-09 - 2021-06-08}",
            r"\author{GitHub summary generator}",
            r"\date{June 08, 2021}",
            r"\begin{document}",
            r"\maketitle",
            r"\tableofcontents",
            r"\chapter{Introduction}",
            r"\chapter{Projects}",
            "Test created or contributed to 8 projects between 2020-01-09 and 2021-06-08.",
            r"\section{Timeline}",
            r"\startchronology[startyear=2019,stopyear=2021,arrow=false]",
            r"\chronoevent[year=false]{20/4/2020}{test-project}",
            r"\stopchronology",
            r"\section{test-project}",
            r"\subsection{Statistics}",
            r"\subsection{Description}",
            r"\subsection{Languages}",
            r"\subsection{Activity}",
            r"\chapter{Summary}",
            r"\section{Languages}",
            r"\section{Technologies}",
            r"\end{document}",
        ];
        let mut from = 0;
        for needle in order {
            let pos = tex[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {needle}\n{tex}"));
            from += pos + needle.len();
        }
    }

    #[test]
    fn test_repository_section_content() {
        let repos = vec![test_repo(
            "test-project",
            utc(2020, 4, 30),
            vec![
                Language::new("Typescript", 54678),
                Language::new("HTML", 3465),
                Language::new("CSS", 2376),
            ],
        )];
        let tex = build(&repos, &[]);

        assert!(tex.contains(r"\faStar~3 \quad \faEye~1 \quad \faShareAlt~2 \quad \faDatabase~49.92MB \quad MIT"));
        assert!(tex.contains("Hello this is a test project!"));
        assert!(tex.contains(r"\footnote{\url{https://test.github.com/test/test-project}}"));
        assert!(tex.contains(r"\textcolor{gray}{since 2020-04-20 12:39:01}"));
        assert!(tex.contains(r"Top used language: & \textbf{Typescript}\\"));
        assert!(tex.contains(r"Other languages: & HTML, CSS\\"));
        assert!(tex.contains(r"Creation: & 2020-04-20\\"));
        assert!(tex.contains(r"Last update: & 2020-04-30\\"));
        assert!(tex.contains(r"Development: & 10 days\\"));
        assert!(tex.contains(r"Inactive since: & 403 days\\"));
    }

    #[test]
    fn test_summary_lists_languages_and_chart() {
        let repos = vec![test_repo(
            "test-project",
            utc(2020, 4, 30),
            vec![Language::new("C#", 2048), Language::new("HTML", 1024)],
        )];
        let tex = build(&repos, &[]);

        assert!(tex.contains(r"\item C\# \hfill 2.00KB"));
        assert!(tex.contains(r"\item HTML \hfill 1.00KB"));
        assert!(tex.contains(r"\addplot coordinates {(1,2048) (2,1024)};"));
        assert!(tex.contains(r"\caption{Language distribution}"));
    }

    #[test]
    fn test_summary_without_repositories_omits_list_and_chart() {
        let tex = build(&[], &[]);

        assert!(tex.contains(r"\section{Languages}"));
        assert!(!tex.contains(r"\begin{itemize}"));
        assert!(!tex.contains(r"\begin{figure}"));
        assert!(tex.contains("Currently not available!"));
    }

    #[test]
    fn test_single_language_has_no_other_languages_row() {
        let repos = vec![test_repo(
            "solo",
            utc(2020, 4, 30),
            vec![Language::new("Rust", 10)],
        )];
        let tex = build(&repos, &[]);

        assert!(tex.contains(r"\textbf{Rust}"));
        assert!(!tex.contains("Other languages:"));
    }

    #[test]
    fn test_missing_description_and_license() {
        let mut repo = test_repo("bare", utc(2020, 4, 30), Vec::new());
        repo.description = None;
        repo.license = None;
        let tex = build(&[repo], &[]);

        assert!(tex.contains("No description available."));
        assert!(tex.contains(r"\quad No license"));
        assert!(!tex.contains(r"\subsection{Languages}"));
    }

    #[test]
    fn test_missing_user_falls_back_to_login() {
        let mut builder =
            DocBuilder::new("octo-cat", None, &[], &[], TimeRange::Years { start: 2020, end: 2021 }, now());
        builder.generate_structure();
        let tex = builder.finish().dumps();

        assert!(tex.contains(r"\title{Project overview of octo-cat 2020 - 2021}"));
        assert!(tex.contains("octo-cat created or contributed to 0 projects between 2020 and 2021."));
        assert!(!tex.contains("test.github.com"));
    }

    #[test]
    fn test_escapes_repository_names() {
        let repos = vec![test_repo("my_repo", utc(2020, 4, 30), Vec::new())];
        let tex = build(&repos, &[]);

        assert!(tex.contains(r"\section{my\_repo}"));
        assert!(tex.contains(r"\chronoevent[year=false]{20/4/2020}{my\_repo}"));
    }

    #[test]
    fn test_gists_section() {
        let mut files = BTreeMap::new();
        files.insert(
            "notes.md".to_string(),
            GistFile {
                language: Some("Markdown".to_string()),
                size: 12,
            },
        );
        let gists = vec![
            Gist {
                id: "abc123".to_string(),
                url: "https://gist.github.com/abc123".to_string(),
                description: Some("Notes".to_string()),
                files,
                created: utc(2020, 3, 1),
                updated: utc(2020, 3, 2),
            },
            Gist {
                id: "old".to_string(),
                url: "https://gist.github.com/old".to_string(),
                description: None,
                files: BTreeMap::new(),
                created: utc(2018, 3, 1),
                updated: utc(2018, 3, 2),
            },
        ];
        let tex = build(&[], &gists);

        assert!(tex.contains(r"\section{Gists}"));
        assert!(tex.contains(r"\item \textbf{Notes} \footnote{\url{https://gist.github.com/abc123}} (notes.md)"));
        assert!(!tex.contains("gist.github.com/old"));
    }

    #[test]
    fn test_no_gists_section_when_none_in_range() {
        let tex = build(&[], &[]);
        assert!(!tex.contains(r"\section{Gists}"));
    }
}
