//! Reference university catalog handed to the model as opaque context.
//!
//! Free-form text, not a queryable table. Edits here are content changes only.

pub const UNIVERSITY_CATALOG: &str = "\
University Database:
1. MIT (USA): High tuition, requires top grades, known for CS, AI, Engineering.
2. Stanford (USA): High tuition, requires top grades, known for CS, Business.
3. Carnegie Mellon University (USA): High tuition, requires strong academics, known for CS, Robotics, AI.
4. UC Berkeley (USA): High tuition, highly competitive, known for CS, Engineering, Research.
5. Georgia Tech (USA): Medium-high tuition, competitive, known for Engineering, CS.
6. Harvard University (USA): High tuition, requires top grades, known for Research, Business, CS.
7. University of Toronto (Canada): Medium tuition, known for Research, AI.
8. University of Waterloo (Canada): Medium tuition, known for CS, Co-op programs, Engineering.
9. McGill University (Canada): Medium tuition, research-oriented, strong in Engineering, CS.
10. University of Cambridge (UK): High tuition (for internationals), requires excellent grades, known for Engineering, AI, Research.
11. University of Oxford (UK): High tuition, very competitive, known for Mathematics, CS, Research.
12. TUM Munich (Germany): Low tuition, known for Engineering, sometimes requires German skills.
13. ETH Zurich (Switzerland): Low tuition, very competitive, known for Engineering, Robotics, Research.
14. EPFL Lausanne (Switzerland): Low tuition, research-focused, known for Engineering, AI.
15. KTH Royal Institute of Technology (Sweden): Low tuition (EU), known for Engineering, CS.
16. IIT Bombay (India): Low tuition, extremely competitive (JEE), known for Tech.
17. National University of Singapore (NUS): Medium tuition, competitive, known for CS, Engineering, Research.
18. Nanyang Technological University (NTU), Singapore: Medium tuition, strong in AI, Engineering, Research.
19. Seoul National University (South Korea): Low tuition, very competitive, known for Engineering, CS.
20. KAIST (South Korea): Low tuition, top-tier science and tech institute, strong in AI, Robotics.
21. University of Melbourne (Australia): High tuition, known for Research.
22. University of Sydney (Australia): High tuition, known for Research, Engineering.";
