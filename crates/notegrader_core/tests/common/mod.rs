#![allow(dead_code)]

use chrono::{DateTime, FixedOffset};
use notegrader_core::model::node::RawNode;
use notegrader_core::MemoryHierarchyProvider;

pub const HIERARCHY_XML: &str = r#"<one:Notebooks xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote">
  <one:Notebook name="Ada Lovelace" ID="nb-ada">
    <one:SectionGroup name="1) Monday" ID="g-mon">
      <one:Section name="Math" ID="s-math">
        <one:Page ID="p-fractions" name="Fractions" />
      </one:Section>
    </one:SectionGroup>
    <one:SectionGroup name="Tuesday" ID="g-tue">
      <one:Section name="Reading" ID="s-reading" isInRecycleBin="true">
        <one:Page ID="p-story" name="Story" />
      </one:Section>
    </one:SectionGroup>
    <one:SectionGroup name="OneNote_RecycleBin" ID="g-bin" isRecycleBin="true">
      <one:Section name="Grammar" ID="s-bin">
        <one:Page ID="p-trash" name="Trash" />
      </one:Section>
    </one:SectionGroup>
    <one:Section name="Math Class" ID="s-top-math" />
    <one:Section name="Reading Log" ID="s-top-reading" />
  </one:Notebook>
  <one:Notebook name="QuestLearning Staff" ID="nb-ql">
    <one:Section name="Grammar" ID="s-ql" />
  </one:Notebook>
</one:Notebooks>"#;

pub const FRACTIONS_XML: &str = r#"<one:Page xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote"
    ID="p-fractions" name="Fractions"
    dateTime="2024-03-06T09:00:00.000Z" lastModifiedTime="2024-03-07T09:00:00.000Z">
  <one:TagDef index="0" name="To review" type="0" />
  <one:Outline>
    <one:OE>
      <one:Tag index="0" completed="false" creationDate="2024-03-06T12:00:00.000Z" />
    </one:OE>
  </one:Outline>
  <one:Image>
    <one:Position x="0" y="0" z="0" />
    <one:Size width="10" height="10" />
  </one:Image>
  <one:InkDrawing><one:Position x="1" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:InkDrawing><one:Position x="2" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:InkDrawing><one:Position x="3" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:InkDrawing><one:Position x="4" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:InkDrawing><one:Position x="5" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:Outline>
    <one:OE>
      <one:InkWord recognizedText="3/4" inkOriginX="-6" inkOriginY="-2" width="2" height="1" />
    </one:OE>
  </one:Outline>
</one:Page>"#;

pub const STORY_XML: &str = r#"<one:Page xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote"
    ID="p-story" name="Story"
    dateTime="2024-03-01T09:00:00.000Z" lastModifiedTime="2024-03-01T09:00:00.000Z" />"#;

/// A notebook whose only grammar work lives in a weekday folder. The page was
/// written on a Monday evening in New York, which is already Tuesday in UTC.
pub const GROUPED_GRAMMAR_XML: &str = r#"<one:Notebooks xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote">
  <one:Notebook name="Grace Hopper" ID="nb-grace">
    <one:SectionGroup name="2) Monday" ID="g-grace-mon">
      <one:Section name="Grammar Drills" ID="s-grace-grammar">
        <one:Page ID="p-commas" name="Commas" />
      </one:Section>
    </one:SectionGroup>
    <one:Section name="Math Class" ID="s-grace-math" />
  </one:Notebook>
</one:Notebooks>"#;

pub const COMMAS_XML: &str = r#"<one:Page xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote"
    ID="p-commas" name="Commas"
    dateTime="2024-03-04T19:30:00-05:00" lastModifiedTime="2024-03-04T19:45:00-05:00">
  <one:Image>
    <one:Position x="0" y="0" z="0" />
    <one:Size width="10" height="10" />
  </one:Image>
  <one:InkDrawing><one:Position x="1" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:InkDrawing><one:Position x="2" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:InkDrawing><one:Position x="3" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:InkDrawing><one:Position x="4" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
  <one:InkDrawing><one:Position x="5" y="1" /><one:Size width="1" height="1" /></one:InkDrawing>
</one:Page>"#;

fn at(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap()
}

/// Friday 2024-03-08, noon UTC.
pub fn now() -> DateTime<FixedOffset> {
    at("2024-03-08T12:00:00Z")
}

/// Monday 2024-03-04, 8 PM in New York.
pub fn monday_evening_new_york() -> DateTime<FixedOffset> {
    at("2024-03-04T20:00:00-05:00")
}

pub fn provider() -> MemoryHierarchyProvider {
    MemoryHierarchyProvider::new(RawNode::parse_xml(HIERARCHY_XML).unwrap())
        .with_page("p-fractions", RawNode::parse_xml(FRACTIONS_XML).unwrap())
        .with_page("p-story", RawNode::parse_xml(STORY_XML).unwrap())
}

pub fn grouped_grammar_provider() -> MemoryHierarchyProvider {
    MemoryHierarchyProvider::new(RawNode::parse_xml(GROUPED_GRAMMAR_XML).unwrap())
        .with_page("p-commas", RawNode::parse_xml(COMMAS_XML).unwrap())
}
